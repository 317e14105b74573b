//! 一次"查看仓库"操作的编排：解析 URL → 列出提交 → 逐个获取并格式化 diff
//!
//! 网络失败不会向上传播，而是变成报告里的提示信息；只有在发出任何请求之前就能判定的
//! 问题（URL 不合法、要求 token 但缺失）才返回 [`ViewError`]。

use crate::clients::CommitSource;
use crate::diff::format_diff;
use crate::errors::ViewError;
use crate::logging::OperationTimer;
use crate::repo_ref::parse_repo_url;
use crate::types::diff::{FormatOptions, FormattedDiff};
use crate::types::github::{Commit, RepoRef};

/// 用户提交的表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub repo_url: String,
    pub project_name: Option<String>,
}

impl ViewRequest {
    pub fn new(repo_url: impl Into<String>, project_name: Option<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            project_name: project_name
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    Formatted(FormattedDiff),
    /// 该提交的 diff 获取失败，其余提交不受影响
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub commit: Commit,
    pub diff: DiffOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitListing {
    /// 提交列表获取失败，按"没有提交"展示
    Failed(String),
    Empty,
    Commits(Vec<CommitReport>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReport {
    pub repo: RepoRef,
    pub project_name: Option<String>,
    /// 没有配置 token，以匿名身份访问
    pub anonymous: bool,
    pub listing: CommitListing,
}

pub const NO_COMMITS_MESSAGE: &str = "No commits found or unable to fetch commit history.";
pub const ANONYMOUS_WARNING: &str =
    "No GitHub token configured: requests are unauthenticated (lower rate limits, public repositories only).";

pub struct Viewer<S> {
    source: S,
    options: FormatOptions,
    require_token: bool,
}

impl<S: CommitSource> Viewer<S> {
    pub fn new(source: S, options: FormatOptions) -> Self {
        Self {
            source,
            options,
            require_token: false,
        }
    }

    /// 开启后，没有凭据时拒绝所有查看操作
    pub fn require_token(mut self, require: bool) -> Self {
        self.require_token = require;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn view(&self, request: &ViewRequest) -> Result<RepoReport, ViewError> {
        let repo = parse_repo_url(&request.repo_url)
            .ok_or_else(|| ViewError::InvalidRepoUrl(request.repo_url.clone()))?;

        let anonymous = !self.source.has_credential();
        if anonymous && self.require_token {
            return Err(ViewError::MissingToken);
        }
        if anonymous {
            tracing::warn!(repo = %repo, "no GitHub token configured, using anonymous access");
        }

        let timer = OperationTimer::new("view_repository").with_metadata("repo", &repo.to_string());
        let listing = self.collect(&repo).await;
        timer.finish();

        Ok(RepoReport {
            repo,
            project_name: request.project_name.clone(),
            anonymous,
            listing,
        })
    }

    async fn collect(&self, repo: &RepoRef) -> CommitListing {
        let commits = match self.source.list_commits(repo).await {
            Ok(commits) => commits,
            Err(e) => {
                tracing::warn!(repo = %repo, error = %e, "failed to fetch commit history");
                return CommitListing::Failed(format!("Error fetching commits: {}", e));
            }
        };

        if commits.is_empty() {
            tracing::info!(repo = %repo, "repository has no commits");
            return CommitListing::Empty;
        }
        tracing::info!(repo = %repo, count = commits.len(), "fetched commit history");

        // 按提交顺序串行获取，不并发
        let mut reports = Vec::with_capacity(commits.len());
        for commit in commits {
            let diff = match self.source.fetch_commit_diff(repo, &commit.sha).await {
                Ok(text) => DiffOutcome::Formatted(format_diff(&text, &self.options)),
                Err(e) => {
                    tracing::warn!(sha = %commit.sha, error = %e, "failed to fetch commit diff");
                    DiffOutcome::Unavailable(format!(
                        "Error fetching diff for commit {}: {}",
                        commit.sha, e
                    ))
                }
            };
            reports.push(CommitReport { commit, diff });
        }
        CommitListing::Commits(reports)
    }
}
