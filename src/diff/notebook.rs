//! Jupyter notebook (`.ipynb`) diff 行的源码提取
//!
//! notebook 以 JSON 保存，每个单元格的源码是字符串数组，diff 中的一行通常形如
//! `+    "print(1)\n",`。这里只做文本层面的识别：不关心 JSON 嵌套深度，
//! 跨多行的数组元素也不会被拼接还原。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // <+|-><空白>"<转义后的内容>\n",?
    static ref SOURCE_LINE: Regex =
        Regex::new(r#"^([+-])(\s*)"((?:[^"\\]|\\.)*)\\n",?\s*$"#)
            .expect("notebook source line pattern is valid");
}

/// 是否为 notebook 文件的 `diff --git` 头
pub fn is_notebook_header(header: &str) -> bool {
    header.contains(".ipynb")
}

/// 尝试把 notebook diff 行解码为 `+`/`-` 加上源码文本
///
/// 形状不符时返回 `None`，由调用方决定原样输出还是丢弃。
pub fn decode_source_line(line: &str) -> Option<String> {
    let caps = SOURCE_LINE.captures(line)?;
    let sign = caps.get(1)?.as_str();
    let indent = caps.get(2)?.as_str();
    let escaped = caps.get(3)?.as_str();
    Some(format!("{sign}{indent}{}", unescape(escaped)))
}

/// 只还原 `\n` 与 `\"`，其余转义序列（包括 `\\`）保持原样
fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_addition() {
        assert_eq!(
            decode_source_line(r#"+    "print(1)\n","#).as_deref(),
            Some("+    print(1)")
        );
    }

    #[test]
    fn test_decode_deletion_without_trailing_comma() {
        assert_eq!(
            decode_source_line(r#"-    "return x\n""#).as_deref(),
            Some("-    return x")
        );
    }

    #[test]
    fn test_decode_escaped_quotes() {
        assert_eq!(
            decode_source_line(r#"+    "print(\"hi\")\n","#).as_deref(),
            Some(r#"+    print("hi")"#)
        );
    }

    #[test]
    fn test_embedded_newline_escape_is_decoded() {
        assert_eq!(
            decode_source_line(r#"+ "a\nb\n","#).as_deref(),
            Some("+ a\nb")
        );
    }

    #[test]
    fn test_escaped_backslash_is_kept() {
        assert_eq!(
            decode_source_line(r#"+    "path = 'C:\\tmp'\n","#).as_deref(),
            Some(r"+    path = 'C:\\tmp'")
        );
    }

    #[test]
    fn test_empty_source_line() {
        assert_eq!(decode_source_line(r#"+    "\n","#).as_deref(), Some("+    "));
    }

    #[test]
    fn test_non_source_shapes_are_rejected() {
        for line in [
            "+   ],",
            r#"+    "cell_type": "code","#,
            r#"+    "print(2)""#,
            r#"+    "execution_count": 3,"#,
            "+",
            " \"print(1)\\n\",",
        ] {
            assert!(decode_source_line(line).is_none(), "expected no decode for {line:?}");
        }
    }

    #[test]
    fn test_notebook_header_detection() {
        assert!(is_notebook_header("diff --git a/nb/train.ipynb b/nb/train.ipynb"));
        assert!(!is_notebook_header("diff --git a/src/main.py b/src/main.py"));
    }
}
