//! 交互页面路由测试

use std::sync::Arc;

use gitview::clients::GitHubClient;
use gitview::handlers::viewer::Viewer;
use gitview::render::html::FormState;
use gitview::server::routes;
use gitview::types::diff::FormatOptions;
use httpmock::prelude::*;
use serde_json::json;

fn defaults() -> FormState {
    FormState {
        repo_url: "https://github.com/octocat/hello-world".to_string(),
        project_name: "Demo Project".to_string(),
    }
}

fn viewer_for(base_url: String, require_token: bool) -> Arc<Viewer<GitHubClient>> {
    Arc::new(
        Viewer::new(GitHubClient::new(base_url, None), FormatOptions::default())
            .require_token(require_token),
    )
}

#[tokio::test]
async fn test_health() {
    let filter = routes(viewer_for("http://127.0.0.1:1".to_string(), false), defaults());
    let resp = warp::test::request().path("/health").reply(&filter).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_idle_page_prefills_defaults() {
    let filter = routes(viewer_for("http://127.0.0.1:1".to_string(), false), defaults());
    let resp = warp::test::request().path("/").reply(&filter).await;

    assert_eq!(resp.status(), 200);
    let body = String::from_utf8(resp.body().to_vec()).unwrap();
    assert!(body.contains("value=\"https://github.com/octocat/hello-world\""));
    assert!(body.contains("value=\"Demo Project\""));
    assert!(!body.contains("Commit History"));
}

#[tokio::test]
async fn test_invalid_url_is_rejected_without_network() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(200).json_body(json!([]));
        })
        .await;

    let filter = routes(viewer_for(server.base_url(), false), defaults());
    let resp = warp::test::request()
        .path("/?repo_url=github.com%2Ffoo")
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), 400);
    let body = String::from_utf8(resp.body().to_vec()).unwrap();
    assert!(body.contains("Invalid GitHub repository URL"));
    assert_eq!(any.hits_async().await, 0);
}

#[tokio::test]
async fn test_submitted_form_renders_report() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/hello-world/commits");
            then.status(200).json_body(json!([{
                "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
                "commit": {
                    "author": {"name": "Mona", "date": "2024-05-01T09:30:00Z"},
                    "message": "Add <script> guard"
                }
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(
                "/repos/octocat/hello-world/commits/6dcb09b5b57875f334f61aebed695e2e4193db5e",
            );
            then.status(200)
                .body("diff --git a/x b/x\n@@ -0,0 +1 @@\n+<b>bold</b>\n");
        })
        .await;

    let filter = routes(viewer_for(server.base_url(), false), defaults());
    let resp = warp::test::request()
        .path("/?repo_url=https%3A%2F%2Fgithub.com%2Foctocat%2Fhello-world&project_name=Mine")
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), 200);
    let body = String::from_utf8(resp.body().to_vec()).unwrap();
    assert!(body.contains("Repository: octocat/hello-world"));
    assert!(body.contains("Project Name: Mine"));
    assert!(body.contains("No GitHub token configured"));
    assert!(body.contains("Add &lt;script&gt; guard"));
    assert!(body.contains("+&lt;b&gt;bold&lt;/b&gt;"));
}

#[tokio::test]
async fn test_required_token_refuses_before_fetch() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(200).json_body(json!([]));
        })
        .await;

    let filter = routes(viewer_for(server.base_url(), true), defaults());
    let resp = warp::test::request()
        .path("/?repo_url=https%3A%2F%2Fgithub.com%2Foctocat%2Fhello-world")
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), 400);
    let body = String::from_utf8(resp.body().to_vec()).unwrap();
    assert!(body.contains("A GitHub token is required"));
    assert_eq!(any.hits_async().await, 0);
}
