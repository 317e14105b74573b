use std::fmt::{self, Write};

use crate::errors::ViewError;
use crate::handlers::viewer::{
    CommitListing, CommitReport, DiffOutcome, RepoReport, ANONYMOUS_WARNING, NO_COMMITS_MESSAGE,
};
use crate::types::diff::{FormattedDiff, FragmentKind};

pub const PAGE_TITLE: &str = "GitHub Repo Code Viewer";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 72rem; padding: 0 1rem; }
form label { display: block; margin-top: .75rem; font-weight: 600; }
form input[type=text] { width: 100%; padding: .4rem; font-size: 1rem; }
form button { margin-top: 1rem; padding: .5rem 1rem; font-size: 1rem; }
.commit { border-top: 1px solid #ddd; padding: .75rem 0; }
.diff { background: #0d1117; color: #c9d1d9; padding: .75rem; overflow-x: auto; white-space: pre; font-family: ui-monospace, monospace; }
.diff .header { font-weight: bold; display: block; margin-top: .75rem; }
.diff .addition { color: #3fb950; }
.diff .deletion { color: #f85149; }
.diff .notice { color: #8b949e; font-style: italic; }
.warning { background: #fff8c5; border: 1px solid #d4a72c; padding: .5rem; }
.error { background: #ffebe9; border: 1px solid #cf222e; padding: .5rem; }
.info { background: #ddf4ff; border: 1px solid #54aeff; padding: .5rem; }
"#;

/// 表单当前的值，用于回填
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub repo_url: String,
    pub project_name: String,
}

/// 页面的结果区域
#[derive(Debug)]
pub enum PageBody<'a> {
    /// 还没有提交过表单
    Idle,
    Rejected(&'a ViewError),
    Report(&'a RepoReport),
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn css_class(kind: FragmentKind) -> &'static str {
    match kind {
        FragmentKind::Header => "header",
        FragmentKind::Addition => "addition",
        FragmentKind::Deletion => "deletion",
        FragmentKind::Notice => "notice",
    }
}

fn write_diff<W: fmt::Write>(out: &mut W, diff: &FormattedDiff) -> fmt::Result {
    out.write_str("<pre class=\"diff\">")?;
    for fragment in diff {
        writeln!(
            out,
            "<span class=\"{}\">{}</span>",
            css_class(fragment.kind),
            escape_html(&fragment.content)
        )?;
    }
    out.write_str("</pre>")
}

pub fn render_diff(diff: &FormattedDiff) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_diff(&mut out, diff)?;
    Ok(out)
}

fn write_commit<W: fmt::Write>(out: &mut W, report: &CommitReport) -> fmt::Result {
    let commit = &report.commit;
    let short = escape_html(commit.short_sha());
    out.write_str("<section class=\"commit\">\n")?;
    writeln!(out, "<p><strong>Commit:</strong> <code>{}</code></p>", short)?;
    writeln!(
        out,
        "<p><strong>Author:</strong> {}</p>",
        escape_html(&commit.author_name)
    )?;
    writeln!(
        out,
        "<p><strong>Date:</strong> <time datetime=\"{0}\">{0}</time></p>",
        commit.author_date_iso()
    )?;
    writeln!(
        out,
        "<p><strong>Message:</strong> {}</p>",
        escape_html(&commit.message)
    )?;
    writeln!(
        out,
        "<details><summary>View Code Difference for Commit <code>{}</code></summary>",
        short
    )?;
    match &report.diff {
        DiffOutcome::Formatted(diff) => write_diff(out, diff)?,
        DiffOutcome::Unavailable(reason) => writeln!(
            out,
            "<p class=\"warning\">{}<br>Could not retrieve diff for this commit.</p>",
            escape_html(reason)
        )?,
    }
    out.write_str("\n</details>\n</section>\n")
}

fn write_report<W: fmt::Write>(out: &mut W, report: &RepoReport) -> fmt::Result {
    if report.anonymous {
        writeln!(out, "<p class=\"warning\">{}</p>", escape_html(ANONYMOUS_WARNING))?;
    }
    writeln!(
        out,
        "<h2>Repository: {}</h2>",
        escape_html(&report.repo.to_string())
    )?;
    if let Some(project) = &report.project_name {
        writeln!(out, "<p>Project Name: {}</p>", escape_html(project))?;
    }
    out.write_str("<hr>\n<h2>Commit History</h2>\n")?;

    match &report.listing {
        CommitListing::Failed(reason) => {
            writeln!(out, "<p class=\"error\">{}</p>", escape_html(reason))?;
            writeln!(out, "<p class=\"warning\">{}</p>", NO_COMMITS_MESSAGE)?;
        }
        CommitListing::Empty => {
            writeln!(out, "<p class=\"info\">{}</p>", NO_COMMITS_MESSAGE)?;
        }
        CommitListing::Commits(commits) => {
            for commit in commits {
                write_commit(out, commit)?;
            }
        }
    }
    Ok(())
}

pub fn render_report(report: &RepoReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn render_form(form: &FormState) -> String {
    format!(
        r#"<form method="get" action="/">
<label for="project_name">Project Name (Optional)</label>
<input type="text" id="project_name" name="project_name" value="{}">
<label for="repo_url">Enter GitHub Repo URL</label>
<input type="text" id="repo_url" name="repo_url" value="{}">
<button type="submit">Fetch Repo Details</button>
</form>
"#,
        escape_html(&form.project_name),
        escape_html(&form.repo_url)
    )
}

/// 完整页面：标题、表单以及（可选的）结果区域
pub fn render_page(form: &FormState, body: PageBody<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n<p>Fetches and displays the commit history and code differences for a given GitHub repository.</p>\n",
        title = PAGE_TITLE,
        style = STYLE,
    )?;
    out.push_str(&render_form(form));

    match body {
        PageBody::Idle => {}
        PageBody::Rejected(err) => {
            writeln!(out, "<p class=\"error\">{}</p>", escape_html(&err.to_string()))?;
        }
        PageBody::Report(report) => write_report(&mut out, report)?,
    }

    out.push_str("</body>\n</html>\n");
    Ok(out)
}
