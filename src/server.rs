//! 交互页面：一个表单加上结果区域，每次提交都是一次独立的查看操作

use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::{http::StatusCode, Filter, Rejection, Reply};

use crate::clients::CommitSource;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::handlers::viewer::{ViewRequest, Viewer};
use crate::render::html::{render_page, FormState, PageBody};

const RENDER_FAILED: &str = "Failed to render page.";

/// `GET /` 的查询参数，即表单字段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub repo_url: Option<String>,
    pub project_name: Option<String>,
}

async fn handle_page<S: CommitSource>(
    query: PageQuery,
    viewer: Arc<Viewer<S>>,
    defaults: Arc<FormState>,
) -> Result<impl Reply, Infallible> {
    let (page, status) = match query.repo_url {
        None => (render_page(&defaults, PageBody::Idle), StatusCode::OK),
        Some(repo_url) => {
            let form = FormState {
                repo_url: repo_url.clone(),
                project_name: query.project_name.clone().unwrap_or_default(),
            };
            let request = ViewRequest::new(repo_url, query.project_name);
            match viewer.view(&request).await {
                Ok(report) => (render_page(&form, PageBody::Report(&report)), StatusCode::OK),
                Err(err) => {
                    tracing::info!(error = %err, "view request rejected");
                    (
                        render_page(&form, PageBody::Rejected(&err)),
                        StatusCode::BAD_REQUEST,
                    )
                }
            }
        }
    };

    let reply = match page {
        Ok(html) => warp::reply::with_status(warp::reply::html(html), status),
        Err(e) => {
            tracing::error!(error = %e, "failed to render page");
            warp::reply::with_status(
                warp::reply::html(format!("<p>{}</p>", RENDER_FAILED)),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    };
    Ok(reply)
}

/// 页面路由：`GET /` 与 `GET /health`
pub fn routes<S>(
    viewer: Arc<Viewer<S>>,
    defaults: FormState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    S: CommitSource + 'static,
{
    let defaults = Arc::new(defaults);
    let with_viewer = warp::any().map(move || viewer.clone());
    let with_defaults = warp::any().map(move || defaults.clone());

    let page = warp::path::end()
        .and(warp::get())
        .and(warp::query::<PageQuery>())
        .and(with_viewer)
        .and(with_defaults)
        .and_then(handle_page::<S>);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&json!({"ok": true})));

    page.or(health).with(warp::trace::request())
}

/// 启动页面服务，Ctrl-C 时优雅退出
pub async fn start_server(config: &AppConfig, addr: SocketAddr) -> Result<(), AppError> {
    let client = config.github_client();
    if !client.has_token() {
        if config.github.require_token {
            tracing::warn!("no GitHub token configured and require_token is set: every request will be refused");
        } else {
            tracing::warn!("no GitHub token configured: using anonymous access");
        }
    }

    let viewer = Arc::new(
        Viewer::new(client, config.format_options()).require_token(config.github.require_token),
    );
    let defaults = FormState {
        repo_url: config.server.default_repo_url.clone(),
        project_name: config.server.default_project_name.clone(),
    };

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let (bound, server) = warp::serve(routes(viewer, defaults))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| AppError::Generic(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!(addr = %bound, "gitview page listening on http://{}", bound);
    server.await;
    tracing::info!("gitview page shutting down");
    Ok(())
}
