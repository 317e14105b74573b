use serde::{Deserialize, Serialize};

/// 没有任何新增/删除行时的提示文本
pub const NO_SIGNIFICANT_CHANGES: &str = "No significant code changes found in this commit.";

/// 格式化后片段的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// `diff --git` 文件头
    Header,
    Addition,
    Deletion,
    /// 提示信息（例如 "no significant changes"）
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffFragment {
    pub kind: FragmentKind,
    pub content: String,
}

impl DiffFragment {
    pub fn new(kind: FragmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// 可直接展示的 diff：有序的带样式片段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedDiff {
    fragments: Vec<DiffFragment>,
}

impl FormattedDiff {
    pub fn from_fragments(fragments: Vec<DiffFragment>) -> Self {
        Self { fragments }
    }

    pub fn fragments(&self) -> &[DiffFragment] {
        &self.fragments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffFragment> {
        self.fragments.iter()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// 新增与删除片段的数量
    pub fn change_count(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| matches!(f.kind, FragmentKind::Addition | FragmentKind::Deletion))
            .count()
    }

    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }

    pub fn kinds(&self) -> Vec<FragmentKind> {
        self.fragments.iter().map(|f| f.kind).collect()
    }
}

impl<'a> IntoIterator for &'a FormattedDiff {
    type Item = &'a DiffFragment;
    type IntoIter = std::slice::Iter<'a, DiffFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

/// notebook 行无法识别为 JSON 源码字符串时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotebookFallback {
    /// 原样输出，保留新增/删除标记
    #[default]
    Verbatim,
    /// 丢弃该行
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    pub notebook_fallback: NotebookFallback,
}

impl FormatOptions {
    pub fn with_notebook_fallback(notebook_fallback: NotebookFallback) -> Self {
        Self { notebook_fallback }
    }
}
