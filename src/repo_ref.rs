//! 从 GitHub 仓库 URL 中解析 owner/name

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::github::RepoRef;

lazy_static! {
    // 后面允许跟额外的路径段、查询串或锚点，例如 `/tree/main`
    static ref GITHUB_REPO_URL: Regex =
        Regex::new(r"^https://github\.com/([^/?#\s]+)/([^/?#\s]+?)(?:\.git)?(?:[/?#].*)?$")
            .expect("repository URL pattern is valid");
}

/// 解析 `https://github.com/<owner>/<name>[.git]`
///
/// 不匹配时返回 `None`，不会校验仓库是否真的存在。
pub fn parse_repo_url(url: &str) -> Option<RepoRef> {
    let caps = GITHUB_REPO_URL.captures(url.trim())?;
    let owner = caps.get(1)?.as_str();
    let name = strip_git_suffix(caps.get(2)?.as_str());
    RepoRef::new(owner, name)
}

/// 捕获组可能带着 `.git`（例如 `repo.git.git`），这里再剥一次
fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(".git").unwrap_or(name)
}
