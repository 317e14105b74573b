use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 查看 GitHub 仓库的提交历史以及每个提交中实际的增删行
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, name = "gitview")]
pub struct Args {
    /// Path to the configuration file (defaults to ~/.config/gitview/config.toml)
    #[clap(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print commit history and diffs of a repository to the terminal
    Show(ShowArgs),
    /// Serve the interactive page
    Serve(ServeArgs),
}

/// Arguments for the `show` subcommand
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Repository URL, e.g. https://github.com/owner/repo
    #[clap(value_name = "URL")]
    pub url: String,

    /// Optional project name shown above the history
    #[clap(long, value_name = "NAME")]
    pub project: Option<String>,

    /// GitHub token, overrides config file and environment
    #[clap(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Disable colored output
    #[clap(long)]
    pub no_color: bool,
}

/// Arguments for the `serve` subcommand
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Listen address, overrides [server].addr
    #[clap(long, value_name = "ADDR")]
    pub addr: Option<String>,

    /// GitHub token, overrides config file and environment
    #[clap(long, value_name = "TOKEN")]
    pub token: Option<String>,
}

impl Command {
    /// 命令行传入的 token（若有）
    pub fn token(&self) -> Option<String> {
        match self {
            Command::Show(args) => args.token.clone(),
            Command::Serve(args) => args.token.clone(),
        }
    }
}
