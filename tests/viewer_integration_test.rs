//! 用 httpmock 模拟 GitHub API，端到端验证查看流程

use gitview::clients::GitHubClient;
use gitview::handlers::viewer::{
    CommitListing, DiffOutcome, ViewRequest, Viewer, NO_COMMITS_MESSAGE,
};
use gitview::render::terminal::{render_report, TerminalStyle};
use gitview::types::diff::FormatOptions;
use httpmock::prelude::*;
use serde_json::json;

const FIRST: &str = "1111111aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const SECOND: &str = "2222222bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn commit_json(sha: &str, message: &str) -> serde_json::Value {
    json!({
        "sha": sha,
        "commit": {
            "author": {"name": "Mona", "email": "mona@example.com", "date": "2024-05-01T09:30:00Z"},
            "message": message
        }
    })
}

fn viewer(server: &MockServer, token: Option<&str>) -> Viewer<GitHubClient> {
    let client = GitHubClient::new(server.base_url(), token.map(str::to_string));
    Viewer::new(client, FormatOptions::default())
}

#[tokio::test]
async fn test_zero_commits_makes_no_diff_requests() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/empty/commits");
            then.status(200).json_body(json!([]));
        })
        .await;
    let diffs = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/repos/octocat/empty/commits/");
            then.status(200).body("");
        })
        .await;

    let report = viewer(&server, Some("t"))
        .view(&ViewRequest::new("https://github.com/octocat/empty", None))
        .await
        .unwrap();

    list.assert_async().await;
    assert_eq!(diffs.hits_async().await, 0);
    assert!(matches!(report.listing, CommitListing::Empty));
    assert!(!report.anonymous);

    let rendered = render_report(&report, TerminalStyle::plain()).unwrap();
    assert!(rendered.contains(NO_COMMITS_MESSAGE));
}

#[tokio::test]
async fn test_diff_failure_is_scoped_to_its_commit() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/hello-world/commits");
            then.status(200)
                .json_body(json!([commit_json(FIRST, "Broken"), commit_json(SECOND, "Fine")]));
        })
        .await;
    let broken = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/repos/octocat/hello-world/commits/{}", FIRST));
            then.status(500);
        })
        .await;
    let fine = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/repos/octocat/hello-world/commits/{}", SECOND))
                .header("Accept", "application/vnd.github.v3.diff");
            then.status(200)
                .body("diff --git a/a.txt b/a.txt\n--- a/a.txt\n+++ b/a.txt\n@@ -1 +1 @@\n-old\n+new\n");
        })
        .await;

    let report = viewer(&server, None)
        .view(&ViewRequest::new(
            "https://github.com/octocat/hello-world.git",
            Some("Demo".to_string()),
        ))
        .await
        .unwrap();

    broken.assert_async().await;
    fine.assert_async().await;
    assert!(report.anonymous);
    assert_eq!(report.project_name.as_deref(), Some("Demo"));

    let commits = match &report.listing {
        CommitListing::Commits(commits) => commits,
        other => panic!("unexpected listing: {:?}", other),
    };
    assert_eq!(commits.len(), 2);
    match &commits[0].diff {
        DiffOutcome::Unavailable(reason) => {
            assert!(reason.starts_with(&format!("Error fetching diff for commit {}", FIRST)));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    match &commits[1].diff {
        DiffOutcome::Formatted(diff) => assert_eq!(diff.change_count(), 2),
        other => panic!("expected diff, got {:?}", other),
    }

    let rendered = render_report(&report, TerminalStyle::plain()).unwrap();
    assert!(rendered.contains("Could not retrieve diff for this commit."));
    assert!(rendered.contains("+new"));
    assert!(rendered.contains("Commit: 2222222"));
}

#[tokio::test]
async fn test_listing_failure_is_reported_not_raised() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/missing/commits");
            then.status(404).json_body(json!({"message": "Not Found"}));
        })
        .await;

    let report = viewer(&server, Some("t"))
        .view(&ViewRequest::new("https://github.com/octocat/missing", None))
        .await
        .unwrap();

    match report.listing {
        CommitListing::Failed(reason) => {
            assert!(reason.starts_with("Error fetching commits: "));
            assert!(reason.contains("not found"));
        }
        other => panic!("unexpected listing: {:?}", other),
    }
}
