use anyhow::Context;
use clap::Parser;

use gitview::cli::{Args, Command};
use gitview::config::{app_config::parse_addr, AppConfig};
use gitview::handlers::show::handle_show;
use gitview::logging::{init_logging, LoggingConfig};
use gitview::server::start_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = if args.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::production()
    };
    init_logging(logging).context("failed to initialize logging")?;

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path.clone())
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };
    let config = config
        .with_token_override(args.command.token())
        .context("invalid --token")?;
    tracing::debug!(api_base_url = %config.github.api_base_url, "configuration loaded");

    match args.command {
        Command::Show(show) => {
            handle_show(&config, &show.url, show.project, !show.no_color).await?;
        }
        Command::Serve(serve) => {
            let addr = match serve.addr.as_deref() {
                Some(addr) => parse_addr(addr).context("invalid --addr")?,
                None => config.server.addr,
            };
            start_server(&config, addr).await?;
        }
    }

    Ok(())
}
