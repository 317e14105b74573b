use std::io::Write;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::handlers::viewer::{ViewRequest, Viewer};
use crate::render::terminal::{render_report, TerminalStyle};

/// `gitview show`：执行一次查看操作并把报告打印到终端
pub async fn handle_show(
    config: &AppConfig,
    repo_url: &str,
    project_name: Option<String>,
    color: bool,
) -> Result<(), AppError> {
    let viewer = Viewer::new(config.github_client(), config.format_options())
        .require_token(config.github.require_token);

    let request = ViewRequest::new(repo_url, project_name);
    let report = viewer.view(&request).await?;

    let style = if color {
        TerminalStyle::colored()
    } else {
        TerminalStyle::plain()
    };
    let rendered = render_report(&report, style)
        .map_err(|e| AppError::Generic(format!("failed to render report: {}", e)))?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| AppError::IO("writing report to stdout".to_string(), e))?;
    Ok(())
}
