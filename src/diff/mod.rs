//! 统一 diff 文本的逐行分类与 notebook 源码提取

pub mod formatter;
pub mod notebook;

pub use formatter::format_diff;
