use crate::errors::GitHubError;
use crate::logging::OperationTimer;
use crate::types::github::{Commit, CommitResponse, RepoRef};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("gitview/", env!("CARGO_PKG_VERSION"));

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";

/// 提交历史与提交 diff 的来源
///
/// 视图层只依赖这个 trait，测试时可以替换为内存实现。
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// 是否携带访问凭据
    fn has_credential(&self) -> bool;

    /// 列出仓库最近的提交（API 默认分页大小，最新的在前）
    async fn list_commits(&self, repo: &RepoRef) -> Result<Vec<Commit>, GitHubError>;

    /// 获取单个提交的统一 diff 文本
    async fn fetch_commit_diff(&self, repo: &RepoRef, sha: &str) -> Result<String, GitHubError>;
}

#[derive(Debug)]
pub struct GitHubClient {
    base_url: String,
    token: Option<String>,
    user_agent: String,
    client: Client,
    timeout: Duration,
}

impl GitHubClient {
    /// `token` 为 `None` 时以匿名身份访问（速率限制更低，无法访问私有仓库）
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        GitHubClient {
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn commits_url(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}/commits",
            self.base_url,
            repo.owner(),
            repo.name()
        )
    }

    fn commit_url(&self, repo: &RepoRef, sha: &str) -> String {
        format!("{}/{}", self.commits_url(repo), sha)
    }

    /// 构造 GET 请求；只有配置了 token 才带 `Authorization` 头
    pub(crate) fn request(&self, url: &str, accept: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .header(header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout);
        match &self.token {
            Some(token) => request.header(header::AUTHORIZATION, format!("token {}", token)),
            None => request,
        }
    }

    /// 发出一次 GET 请求；非 2xx 响应映射为具体的错误类型
    async fn get(&self, url: &str, accept: &str, resource: &str) -> Result<Response, GitHubError> {
        tracing::debug!(url, accept, authenticated = self.has_token(), "GitHub API request");

        let request = self.request(url, accept);
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limited = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            == Some("0");

        let err = match status {
            StatusCode::UNAUTHORIZED => GitHubError::AuthenticationError,
            StatusCode::FORBIDDEN if rate_limited => GitHubError::RateLimitExceeded,
            StatusCode::FORBIDDEN => GitHubError::AuthenticationError,
            StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimitExceeded,
            StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => GitHubError::NotFound {
                resource: resource.to_string(),
            },
            s => GitHubError::ServerError {
                status_code: s.as_u16(),
            },
        };
        tracing::warn!(url, status = status.as_u16(), error = %err, "GitHub API request failed");
        Err(err)
    }
}

#[async_trait]
impl CommitSource for GitHubClient {
    fn has_credential(&self) -> bool {
        self.has_token()
    }

    async fn list_commits(&self, repo: &RepoRef) -> Result<Vec<Commit>, GitHubError> {
        let timer = OperationTimer::new("list_commits").with_metadata("repo", &repo.to_string());

        let url = self.commits_url(repo);
        let resource = format!("Repository {}", repo);
        let response = self.get(&url, JSON_MEDIA_TYPE, &resource).await?;
        let commits = response
            .json::<Vec<CommitResponse>>()
            .await
            .map_err(GitHubError::ParseError)?;

        timer.finish();
        Ok(commits.into_iter().map(Commit::from).collect())
    }

    async fn fetch_commit_diff(&self, repo: &RepoRef, sha: &str) -> Result<String, GitHubError> {
        let timer = OperationTimer::new("fetch_commit_diff")
            .with_metadata("repo", &repo.to_string())
            .with_metadata("sha", sha);

        let url = self.commit_url(repo, sha);
        let resource = format!("Commit {} in {}", sha, repo);
        let response = self.get(&url, DIFF_MEDIA_TYPE, &resource).await?;
        let diff = response.text().await?;

        timer.finish();
        Ok(diff)
    }
}
