use colored::Colorize;
use std::fmt;

use crate::handlers::viewer::{
    CommitListing, CommitReport, DiffOutcome, RepoReport, ANONYMOUS_WARNING, NO_COMMITS_MESSAGE,
};
use crate::types::diff::{DiffFragment, FormattedDiff, FragmentKind};

const RULE: &str = "---";

/// 终端输出选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalStyle {
    pub color: bool,
}

impl TerminalStyle {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    fn fragment(&self, fragment: &DiffFragment) -> String {
        if !self.color {
            return fragment.content.clone();
        }
        match fragment.kind {
            FragmentKind::Header => fragment.content.bold().to_string(),
            FragmentKind::Addition => fragment.content.bright_green().to_string(),
            FragmentKind::Deletion => fragment.content.bright_red().to_string(),
            FragmentKind::Notice => fragment.content.italic().to_string(),
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        let line = format!("warning: {}", text);
        if self.color {
            line.yellow().to_string()
        } else {
            line
        }
    }

    fn error(&self, text: &str) -> String {
        let line = format!("error: {}", text);
        if self.color {
            line.red().to_string()
        } else {
            line
        }
    }
}

/// 把格式化后的 diff 写入 `out`，文件头前空一行
pub fn write_diff<W: fmt::Write>(
    out: &mut W,
    diff: &FormattedDiff,
    style: TerminalStyle,
) -> fmt::Result {
    for (i, fragment) in diff.iter().enumerate() {
        if fragment.kind == FragmentKind::Header && i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", style.fragment(fragment))?;
    }
    Ok(())
}

pub fn render_diff(diff: &FormattedDiff, style: TerminalStyle) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_diff(&mut out, diff, style)?;
    Ok(out)
}

fn write_commit<W: fmt::Write>(
    out: &mut W,
    report: &CommitReport,
    style: TerminalStyle,
) -> fmt::Result {
    let commit = &report.commit;
    writeln!(out, "{} {}", style.label("Commit:"), commit.short_sha())?;
    writeln!(out, "{} {}", style.label("Author:"), commit.author_name)?;
    writeln!(out, "{} {}", style.label("Date:"), commit.author_date_iso())?;
    writeln!(out, "{} {}", style.label("Message:"), commit.message)?;
    writeln!(
        out,
        "\n{}",
        style.label(&format!("Code Difference for Commit {}", commit.short_sha()))
    )?;
    match &report.diff {
        DiffOutcome::Formatted(diff) => write_diff(out, diff, style)?,
        DiffOutcome::Unavailable(reason) => {
            writeln!(out, "{}", style.warning(reason))?;
            writeln!(out, "{}", style.warning("Could not retrieve diff for this commit."))?;
        }
    }
    writeln!(out, "{}", RULE)
}

/// 把整份报告写入 `out`
pub fn write_report<W: fmt::Write>(
    out: &mut W,
    report: &RepoReport,
    style: TerminalStyle,
) -> fmt::Result {
    if report.anonymous {
        writeln!(out, "{}", style.warning(ANONYMOUS_WARNING))?;
    }
    writeln!(out, "{} {}", style.label("Repository:"), report.repo)?;
    if let Some(project) = &report.project_name {
        writeln!(out, "{} {}", style.label("Project Name:"), project)?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", style.label("Commit History"))?;
    writeln!(out)?;

    match &report.listing {
        CommitListing::Failed(reason) => {
            writeln!(out, "{}", style.error(reason))?;
            writeln!(out, "{}", style.warning(NO_COMMITS_MESSAGE))?;
        }
        CommitListing::Empty => {
            writeln!(out, "{}", style.warning(NO_COMMITS_MESSAGE))?;
        }
        CommitListing::Commits(commits) => {
            for commit in commits {
                write_commit(out, commit, style)?;
            }
        }
    }
    Ok(())
}

pub fn render_report(report: &RepoReport, style: TerminalStyle) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report, style)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::diff::NO_SIGNIFICANT_CHANGES;
    use crate::types::github::{Commit, RepoRef};
    use chrono::{TimeZone, Utc};

    fn report(listing: CommitListing) -> RepoReport {
        RepoReport {
            repo: RepoRef::new("octocat", "hello-world").unwrap(),
            project_name: Some("Demo".to_string()),
            anonymous: false,
            listing,
        }
    }

    fn commit() -> Commit {
        Commit {
            sha: "6dcb09b5b57875f334f61aebed695e2e4193db5e".to_string(),
            author_name: "Mona".to_string(),
            author_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            message: "Fix all the bugs".to_string(),
        }
    }

    #[test]
    fn test_render_diff_plain() {
        let diff = FormattedDiff::from_fragments(vec![
            DiffFragment::new(FragmentKind::Header, "diff --git a/a b/a"),
            DiffFragment::new(FragmentKind::Addition, "+x"),
            DiffFragment::new(FragmentKind::Header, "diff --git a/b b/b"),
            DiffFragment::new(FragmentKind::Deletion, "-y"),
        ]);
        assert_eq!(
            render_diff(&diff, TerminalStyle::plain()).unwrap(),
            "diff --git a/a b/a\n+x\n\ndiff --git a/b b/b\n-y\n"
        );
    }

    #[test]
    fn test_render_diff_colored_uses_ansi() {
        colored::control::set_override(true);
        let diff = FormattedDiff::from_fragments(vec![DiffFragment::new(
            FragmentKind::Addition,
            "+x",
        )]);
        let rendered = render_diff(&diff, TerminalStyle::colored()).unwrap();
        assert!(rendered.contains("\u{1b}["));
        assert!(rendered.contains("+x"));
    }

    #[test]
    fn test_render_report_with_commits() {
        let diff = FormattedDiff::from_fragments(vec![DiffFragment::new(
            FragmentKind::Notice,
            NO_SIGNIFICANT_CHANGES,
        )]);
        let rendered = render_report(
            &report(CommitListing::Commits(vec![CommitReport {
                commit: commit(),
                diff: DiffOutcome::Formatted(diff),
            }])),
            TerminalStyle::plain(),
        )
        .unwrap();

        assert!(rendered.contains("Repository: octocat/hello-world"));
        assert!(rendered.contains("Project Name: Demo"));
        assert!(rendered.contains("Commit: 6dcb09b\n"));
        assert!(rendered.contains("Author: Mona"));
        assert!(rendered.contains("Date: 2024-05-01T09:30:00Z"));
        assert!(rendered.contains("Message: Fix all the bugs"));
        assert!(rendered.contains(NO_SIGNIFICANT_CHANGES));
        assert!(!rendered.contains("warning:"));
    }

    #[test]
    fn test_render_report_empty_and_failed() {
        let empty = render_report(&report(CommitListing::Empty), TerminalStyle::plain()).unwrap();
        assert!(empty.contains(NO_COMMITS_MESSAGE));

        let failed = render_report(
            &report(CommitListing::Failed("Error fetching commits: boom".to_string())),
            TerminalStyle::plain(),
        )
        .unwrap();
        assert!(failed.contains("error: Error fetching commits: boom"));
        assert!(failed.contains(NO_COMMITS_MESSAGE));
    }

    #[test]
    fn test_render_unavailable_diff() {
        let rendered = render_report(
            &report(CommitListing::Commits(vec![CommitReport {
                commit: commit(),
                diff: DiffOutcome::Unavailable("Error fetching diff: 404".to_string()),
            }])),
            TerminalStyle::plain(),
        )
        .unwrap();
        assert!(rendered.contains("warning: Could not retrieve diff for this commit."));
    }

    struct FailingWriter;

    impl fmt::Write for FailingWriter {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_report_propagates_writer_errors() {
        let result = write_report(
            &mut FailingWriter,
            &report(CommitListing::Empty),
            TerminalStyle::plain(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_write_report_appends_to_buffer() {
        let mut out = String::from("header\n");
        write_report(&mut out, &report(CommitListing::Empty), TerminalStyle::plain()).unwrap();
        assert!(out.starts_with("header\nRepository: octocat/hello-world"));
    }

    #[test]
    fn test_anonymous_banner() {
        let mut r = report(CommitListing::Empty);
        r.anonymous = true;
        let rendered = render_report(&r, TerminalStyle::plain()).unwrap();
        assert!(rendered.starts_with("warning: No GitHub token configured"));
    }
}
