use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::fmt;

/// 短 SHA 的长度，与 `git log --oneline` 一致
pub const SHORT_SHA_LEN: usize = 7;

/// GitHub 仓库引用 (owner/name)
///
/// 只能通过 [`crate::repo_ref::parse_repo_url`] 或 [`RepoRef::new`] 构造，
/// 两个字段都非空且不含路径分隔符。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// 校验后构造；字段为空或包含 `/` 时返回 `None`
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Option<Self> {
        let owner = owner.into();
        let name = name.into();
        let valid = |s: &str| !s.is_empty() && !s.contains('/');
        if valid(&owner) && valid(&name) {
            Some(Self { owner, name })
        } else {
            None
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// 提交记录，字段直接取自 API 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub author_name: String,
    pub author_date: DateTime<Utc>,
    pub message: String,
}

impl Commit {
    pub fn short_sha(&self) -> &str {
        self.sha.get(..SHORT_SHA_LEN).unwrap_or(&self.sha)
    }

    /// ISO-8601 格式的作者时间，例如 `2024-05-01T09:30:00Z`
    pub fn author_date_iso(&self) -> String {
        self.author_date.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// `GET /repos/{owner}/{repo}/commits` 数组中的单个元素
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CommitResponse {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CommitDetail {
    pub author: Option<CommitAuthor>,
    pub message: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CommitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

impl From<CommitResponse> for Commit {
    fn from(resp: CommitResponse) -> Self {
        // author 在 GitHub 上理论上可以为 null
        let (author_name, author_date) = match resp.commit.author {
            Some(author) => (author.name, author.date),
            None => ("unknown".to_string(), DateTime::<Utc>::UNIX_EPOCH),
        };
        Commit {
            sha: resp.sha,
            author_name,
            author_date,
            message: resp.commit.message,
        }
    }
}
