//! Internal markdown link auditing.
//!
//! Scans every `.md` file under a root and validates relative links
//! against the filesystem. Absolute URLs, mailto/data targets, and
//! same-page anchors are ignored; fenced code blocks are stripped
//! before extraction to avoid capturing markdown examples.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::fs_util::list_markdown_files;

/// Markdown link pattern. The first group captures a leading `!` so
/// image links can be excluded (the regex crate has no lookbehind).
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[[^\]]*\]\(([^)]+)\)").expect("link regex must compile"));

/// Fenced code blocks, removed before link extraction.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("fence regex must compile"));

/// One broken link inside a file.
#[derive(Debug, Clone, Serialize)]
pub struct LinkIssue {
    /// The link target as written.
    pub target: String,
    /// The filesystem path it resolved to.
    pub resolved: PathBuf,
}

/// All broken links found in one file.
#[derive(Debug, Serialize)]
pub struct FileIssues {
    pub file: PathBuf,
    pub issues: Vec<LinkIssue>,
}

/// Aggregated audit outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Number of files with at least one broken link.
    pub broken_count: usize,
    /// Files with issues, sorted by path.
    pub files: Vec<FileIssues>,
}

impl AuditReport {
    /// Total broken links across all files.
    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.files.iter().map(|f| f.issues.len()).sum()
    }

    /// Returns `true` if no broken links were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }
}

/// Returns `true` for link targets that should resolve locally.
fn is_internal_target(target: &str) -> bool {
    !target.is_empty()
        && !target.starts_with("http://")
        && !target.starts_with("https://")
        && !target.starts_with("mailto:")
        && !target.starts_with("data:")
        && !target.starts_with('#')
}

/// Strip a `#fragment` suffix from a link target.
fn strip_fragment(target: &str) -> &str {
    match target.find('#') {
        Some(i) => &target[..i],
        None => target,
    }
}

/// Extract internal link targets from markdown content, excluding
/// images and fenced code blocks.
fn extract_internal_links(content: &str) -> Vec<String> {
    let without_fences = FENCE_RE.replace_all(content, "");
    LINK_RE
        .captures_iter(&without_fences)
        .filter(|caps| caps[1].is_empty())
        .map(|caps| caps[2].trim().to_string())
        .filter(|target| is_internal_target(target))
        .collect()
}

/// Audit one markdown file. Read failures log a warning and yield an
/// empty issue list.
fn audit_file(file: &Path) -> Vec<LinkIssue> {
    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("warning: {}: {e}", file.display());
            return Vec::new();
        }
    };
    let base = file.parent().unwrap_or_else(|| Path::new("."));

    let mut issues = Vec::new();
    for target in extract_internal_links(&content) {
        let bare = strip_fragment(&target);
        if bare.is_empty() {
            continue;
        }
        let resolved = base.join(bare);
        if resolved.exists() {
            continue;
        }
        // Directory-style links may rely on a default README.md.
        if resolved.join("README.md").exists() {
            continue;
        }
        issues.push(LinkIssue {
            target,
            resolved,
        });
    }
    issues
}

/// Audit all markdown files under `root`.
#[must_use]
pub fn audit(root: &Path) -> AuditReport {
    let mut files = Vec::new();
    for file in list_markdown_files(root) {
        let issues = audit_file(&file);
        if !issues.is_empty() {
            files.push(FileIssues { file, issues });
        }
    }
    AuditReport {
        broken_count: files.len(),
        files,
    }
}

/// Format an audit report as the operator-facing text summary.
#[must_use]
pub fn render_text(report: &AuditReport) -> String {
    if report.is_clean() {
        return "No broken internal link targets detected.\n".to_string();
    }
    let mut out = String::from("Broken internal link targets found:\n\n");
    for file in &report.files {
        out.push_str(&format!("{}\n", file.file.display()));
        for issue in &file.issues {
            out.push_str(&format!(
                "  -> {}  (resolved: {})\n",
                issue.target,
                issue.resolved.display()
            ));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "Summary: {} broken links across {} files.\n",
        report.total_issues(),
        report.files.len()
    ));
    out
}
