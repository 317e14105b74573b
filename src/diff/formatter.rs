//! 把原始统一 diff 文本转换为 [`FormattedDiff`]
//!
//! 单次前向遍历，状态是一个很小的 [`FileState`]，每遇到 `diff --git` 就整体重置。
//! 只输出文件头、新增行和删除行；上下文行、`@@` 头以及 `--- a/`/`+++ b/` 路径行都会被丢弃。

use crate::diff::notebook::{decode_source_line, is_notebook_header};
use crate::types::diff::{
    DiffFragment, FormatOptions, FormattedDiff, FragmentKind, NotebookFallback,
    NO_SIGNIFICANT_CHANGES,
};

const FILE_HEADER_PREFIX: &str = "diff --git";
const OLD_PATH_PREFIX: &str = "--- a/";
const NEW_PATH_PREFIX: &str = "+++ b/";
const HUNK_HEADER_PREFIX: &str = "@@";

/// 当前文件内的解析状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FileState {
    inside_hunk: bool,
    is_notebook: bool,
}

/// 单行的分类结果，按前缀优先级判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    FileHeader,
    PathHeader,
    HunkHeader,
    OutsideHunk,
    Addition,
    Deletion,
    Context,
}

fn classify(line: &str, state: FileState) -> LineClass {
    if line.starts_with(FILE_HEADER_PREFIX) {
        LineClass::FileHeader
    } else if line.starts_with(OLD_PATH_PREFIX) || line.starts_with(NEW_PATH_PREFIX) {
        LineClass::PathHeader
    } else if line.starts_with(HUNK_HEADER_PREFIX) {
        LineClass::HunkHeader
    } else if !state.inside_hunk {
        LineClass::OutsideHunk
    } else if line.starts_with('+') {
        LineClass::Addition
    } else if line.starts_with('-') {
        LineClass::Deletion
    } else {
        LineClass::Context
    }
}

impl FileState {
    /// 消费一行，返回新状态与该行产生的片段（如果有）
    fn step(self, line: &str, options: &FormatOptions) -> (FileState, Option<DiffFragment>) {
        match classify(line, self) {
            LineClass::FileHeader => (
                FileState {
                    inside_hunk: false,
                    is_notebook: is_notebook_header(line),
                },
                Some(DiffFragment::new(FragmentKind::Header, line)),
            ),
            LineClass::HunkHeader => (
                FileState {
                    inside_hunk: true,
                    ..self
                },
                None,
            ),
            LineClass::PathHeader | LineClass::OutsideHunk | LineClass::Context => (self, None),
            LineClass::Addition => (self, self.change(FragmentKind::Addition, line, options)),
            LineClass::Deletion => (self, self.change(FragmentKind::Deletion, line, options)),
        }
    }

    fn change(
        self,
        kind: FragmentKind,
        line: &str,
        options: &FormatOptions,
    ) -> Option<DiffFragment> {
        if !self.is_notebook {
            return Some(DiffFragment::new(kind, line));
        }
        match decode_source_line(line) {
            Some(source) => Some(DiffFragment::new(kind, source)),
            None => match options.notebook_fallback {
                NotebookFallback::Verbatim => Some(DiffFragment::new(kind, line)),
                NotebookFallback::Drop => None,
            },
        }
    }
}

/// 格式化一个 diff 文档
///
/// 当没有任何新增/删除片段时，结果末尾会追加一条 [`FragmentKind::Notice`]，
/// 保证调用方永远不会拿到一个没有说明的空结果。
pub fn format_diff(diff_text: &str, options: &FormatOptions) -> FormattedDiff {
    let (_, mut fragments) = diff_text.lines().fold(
        (FileState::default(), Vec::<DiffFragment>::new()),
        |(state, mut fragments), line| {
            let (next, fragment) = state.step(line, options);
            fragments.extend(fragment);
            (next, fragments)
        },
    );

    let has_changes = fragments
        .iter()
        .any(|f| matches!(f.kind, FragmentKind::Addition | FragmentKind::Deletion));
    if !has_changes {
        fragments.push(DiffFragment::new(FragmentKind::Notice, NO_SIGNIFICANT_CHANGES));
    }

    tracing::trace!(fragments = fragments.len(), "diff formatted");
    FormattedDiff::from_fragments(fragments)
}
