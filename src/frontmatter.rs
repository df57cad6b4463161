//! Frontmatter extraction for markdown assets.
//!
//! Reads the leading `---`-delimited block of an asset file and pulls
//! out the display title, the description (single-line or `|` block
//! scalar), and the `deprecated: true` marker.
//!
//! Every public accessor has a fallible `try_` form so callers can
//! distinguish "field absent" from "file unreadable"; the infallible
//! wrappers log the error and return the documented defaults.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::Result;
use crate::manifest::known_asset_suffix;

/// Deprecation marker, matched case-insensitively anywhere on a line.
static DEPRECATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)deprecated:\s*true").expect("deprecated regex must compile"));

/// Only the leading lines of a file are scanned for the deprecation
/// marker; frontmatter lives there by convention.
const DEPRECATION_SCAN_LINES: usize = 40;

/// Extracted metadata for one markdown asset.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterRecord {
    /// Display title (never empty; falls back to the filename).
    pub title: String,
    /// Description, if the frontmatter declares one.
    pub description: Option<String>,
    /// Whether the asset carries a `deprecated: true` marker.
    pub deprecated: bool,
}

/// Read all frontmatter-derived metadata for an asset file.
///
/// # Errors
///
/// Returns an error if the file cannot be read. Use the individual
/// `extract_*` wrappers for the lenient defaults.
pub fn read_frontmatter(path: &Path) -> Result<FrontmatterRecord> {
    let content = std::fs::read_to_string(path)?;
    Ok(FrontmatterRecord {
        title: title_from_content(&content, path),
        description: description_from_content(&content),
        deprecated: deprecated_in_content(&content),
    })
}

/// Extract the display title, falling back to a filename-derived title
/// on read failure.
#[must_use]
pub fn extract_title(path: &Path) -> String {
    match try_extract_title(path) {
        Ok(title) => title,
        Err(e) => {
            eprintln!("warning: {}: {e}", path.display());
            filename_title(path)
        }
    }
}

/// Extract the display title.
///
/// Resolution order: frontmatter `title:` field, then the first `# `
/// heading (after the frontmatter for known asset files, anywhere in
/// the file otherwise), then a title derived from the filename.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn try_extract_title(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(title_from_content(&content, path))
}

/// Extract the description, or `None` on read failure.
#[must_use]
pub fn extract_description(path: &Path) -> Option<String> {
    match try_extract_description(path) {
        Ok(desc) => desc,
        Err(e) => {
            eprintln!("warning: {}: {e}", path.display());
            None
        }
    }
}

/// Extract the frontmatter description.
///
/// Recognizes the single-line scalar form (one layer of matching
/// quotes stripped, doubled single-quotes un-escaped) and the
/// `description: |` block form (continuation lines joined with single
/// spaces). Returns `Ok(None)` if the frontmatter has no description.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn try_extract_description(path: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(description_from_content(&content))
}

/// Returns `true` if the file carries a `deprecated: true` marker in
/// its leading lines. Read failures default to `false`.
#[must_use]
pub fn is_deprecated(path: &Path) -> bool {
    match std::fs::read_to_string(path) {
        Ok(content) => deprecated_in_content(&content),
        Err(e) => {
            eprintln!("warning: {}: {e}", path.display());
            false
        }
    }
}

/// Look up an arbitrary single-line scalar field in the frontmatter
/// block (e.g. `domain:` for agent files). Read failures and absent
/// fields both collapse to `None`.
#[must_use]
pub fn frontmatter_scalar(path: &Path, key: &str) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let (block, _) = frontmatter_block(&content)?;
    let prefix = format!("{key}:");
    for line in block {
        if let Some(rest) = line.trim().strip_prefix(&prefix) {
            let value = strip_matching_quotes(rest.trim());
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

// ── content-level helpers ───────────────────────────────────────────

/// Split content into its frontmatter lines and the line index just
/// past the closing `---` fence. Returns `None` when the file does not
/// open with a fence.
fn frontmatter_block(content: &str) -> Option<(Vec<&str>, usize)> {
    let mut lines = content.lines();
    if lines.next()?.trim() != "---" {
        return None;
    }
    let mut block = Vec::new();
    for (i, line) in content.lines().enumerate().skip(1) {
        if line.trim() == "---" {
            return Some((block, i + 1));
        }
        block.push(line);
    }
    None
}

/// Strip one layer of matching surrounding quotes. Doubled single
/// quotes inside a single-quoted scalar are un-escaped.
fn strip_matching_quotes(s: &str) -> String {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        if bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
            return s[1..s.len() - 1].to_string();
        }
        if bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\'' {
            return s[1..s.len() - 1].replace("''", "'");
        }
    }
    s.to_string()
}

fn title_from_content(content: &str, path: &Path) -> String {
    let block = frontmatter_block(content);

    if let Some((lines, _)) = &block {
        for line in lines {
            if let Some(rest) = line.trim().strip_prefix("title:") {
                let title = strip_matching_quotes(rest.trim());
                if !title.is_empty() {
                    return title;
                }
            }
        }
    }

    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let is_asset = known_asset_suffix(filename).is_some();

    // Asset files: look for the first heading after the frontmatter
    // closes. Other markdown files: accept a heading anywhere.
    let skip = if is_asset {
        match &block {
            Some((_, end)) => *end,
            None => 0,
        }
    } else {
        0
    };
    for line in content.lines().skip(skip) {
        if let Some(heading) = line.strip_prefix("# ") {
            let heading = heading.trim();
            if !heading.is_empty() {
                return heading.to_string();
            }
        }
    }

    filename_title(path)
}

/// Derive a title from the filename: strip the known asset suffix (or
/// `.md`), replace `-`/`_` with spaces, and capitalize each word.
#[must_use]
pub fn filename_title(path: &Path) -> String {
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let stem = match known_asset_suffix(filename) {
        Some(suffix) => &filename[..filename.len() - suffix.len()],
        None => filename.strip_suffix(".md").unwrap_or(filename),
    };
    stem.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn description_from_content(content: &str) -> Option<String> {
    let (lines, _) = frontmatter_block(content)?;

    for (i, line) in lines.iter().enumerate() {
        let Some(rest) = line.trim().strip_prefix("description:") else {
            continue;
        };
        let rest = rest.trim();

        if rest == "|" {
            // Block scalar: indented continuation lines joined with
            // single spaces, terminated by a dedented line or one that
            // looks like a new field.
            let mut parts = Vec::new();
            for cont in &lines[i + 1..] {
                let indented = cont.starts_with("  ");
                let looks_like_field = looks_like_key(cont.trim());
                if !indented || looks_like_field {
                    break;
                }
                let text = cont.trim();
                if !text.is_empty() {
                    parts.push(text.to_string());
                }
            }
            if parts.is_empty() {
                return None;
            }
            return Some(parts.join(" "));
        }

        if rest.is_empty() {
            return None;
        }
        return Some(strip_matching_quotes(rest));
    }
    None
}

/// Heuristic for "this line starts a new frontmatter field": a bare
/// `key:` or `key: value` shape with a simple identifier key.
fn looks_like_key(line: &str) -> bool {
    let Some(idx) = line.find(':') else {
        return false;
    };
    let key = &line[..idx];
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn deprecated_in_content(content: &str) -> bool {
    content
        .lines()
        .take(DEPRECATION_SCAN_LINES)
        .any(|line| DEPRECATED_RE.is_match(line))
}
