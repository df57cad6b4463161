//! US → UK English normalisation for markdown prose.
//!
//! Applies a fixed token map to markdown content while leaving
//! frontmatter, fenced code blocks, and inline code spans untouched.
//! Replacement preserves case (ALLCAPS, Capitalised, lower). The map
//! deliberately excludes `color`/`colors`: JSON schemas, CSS
//! properties, and block support keys must retain US spelling, so
//! automation does not transform those tokens.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::Result;

/// US → UK token pairs. Longer forms come before their stems to
/// prevent partial overlaps.
const MAP: &[(&str, &str)] = &[
    ("behaviors", "behaviours"),
    ("behavior", "behaviour"),
    ("organizing", "organising"),
    ("organize", "organise"),
    ("optimization", "optimisation"),
    ("optimized", "optimised"),
    ("optimize", "optimise"),
    ("license", "licence"),
    ("customization", "customisation"),
    ("customize", "customise"),
    ("analyzing", "analysing"),
    ("analyze", "analyse"),
    ("initialization", "initialisation"),
    ("initialize", "initialise"),
];

/// Identifiers that must never be rewritten, even in plain prose.
static EXCEPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(ColorPicker|BehaviorSubject|useColorMode|licenseKey)\b")
        .expect("exception regex must compile")
});

/// Compiled word-boundary matchers for each US token.
static TOKEN_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    MAP.iter()
        .map(|(us, uk)| {
            let re = Regex::new(&format!(r"(?i)\b{us}\b")).expect("token regex must compile");
            (re, *uk)
        })
        .collect()
});

/// Rewrite `uk` to match the case shape of the matched US token.
fn preserve_case(matched: &str, uk: &str) -> String {
    if matched == matched.to_uppercase() && matched.chars().any(|c| c.is_ascii_alphabetic()) {
        return uk.to_uppercase();
    }
    if matched.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = uk.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
    }
    uk.to_string()
}

/// Apply the token map to text with no protected identifiers.
fn map_tokens(text: &str) -> String {
    let mut out = text.to_string();
    for (re, uk) in TOKEN_RES.iter() {
        out = re
            .replace_all(&out, |caps: &regex::Captures<'_>| {
                preserve_case(&caps[0], uk)
            })
            .into_owned();
    }
    out
}

/// Apply the token map to one prose segment, passing protected
/// identifiers through verbatim.
fn apply_mappings(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut last = 0;
    for m in EXCEPT_RE.find_iter(segment) {
        out.push_str(&map_tokens(&segment[last..m.start()]));
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&map_tokens(&segment[last..]));
    out
}

/// Transform one line, leaving inline code spans (between backticks)
/// untouched.
fn normalise_line(line: &str) -> String {
    if !line.contains('`') {
        return apply_mappings(line);
    }
    line.split('`')
        .enumerate()
        .map(|(i, part)| {
            // Even segments sit outside code spans.
            if i % 2 == 0 {
                apply_mappings(part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("`")
}

/// Normalise markdown content, skipping the frontmatter block and
/// fenced code blocks entirely.
///
/// Lines are split on `\n` only; a trailing `\r` stays with its line,
/// so CRLF files keep their endings and compare unchanged when no
/// token was rewritten.
#[must_use]
pub fn normalise_content(content: &str) -> String {
    let mut in_fence = false;
    let mut in_frontmatter = false;

    content
        .split('\n')
        .enumerate()
        .map(|(idx, raw)| {
            let (line, cr) = match raw.strip_suffix('\r') {
                Some(stripped) => (stripped, "\r"),
                None => (raw, ""),
            };
            let out = if idx == 0 && line.trim() == "---" {
                in_frontmatter = true;
                line.to_string()
            } else if in_frontmatter {
                if line.trim() == "---" {
                    in_frontmatter = false;
                }
                line.to_string()
            } else if line.starts_with("```") {
                in_fence = !in_fence;
                line.to_string()
            } else if in_fence {
                line.to_string()
            } else {
                normalise_line(line)
            };
            out + cr
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Outcome of normalising one file.
#[derive(Debug)]
pub struct NormaliseResult {
    /// Whether the normalised content differs from the original.
    pub changed: bool,
    /// The normalised content.
    pub content: String,
}

/// Normalise a markdown file. The caller decides whether to write the
/// result back to disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn normalise_file(path: &Path) -> Result<NormaliseResult> {
    let original = std::fs::read_to_string(path)?;
    let content = normalise_content(&original);
    let changed = content != original;
    Ok(NormaliseResult { changed, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn basic_token_replaced() {
        assert_eq!(
            normalise_content("This behavior is expected.\n"),
            "This behaviour is expected.\n"
        );
    }

    #[test]
    fn case_preserved() {
        assert_eq!(normalise_content("Behavior\n"), "Behaviour\n");
        assert_eq!(normalise_content("BEHAVIOR\n"), "BEHAVIOUR\n");
        assert_eq!(normalise_content("behavior\n"), "behaviour\n");
    }

    #[test]
    fn longer_forms_win() {
        assert_eq!(
            normalise_content("optimization and behaviors\n"),
            "optimisation and behaviours\n"
        );
    }

    #[test]
    fn color_not_in_map() {
        assert_eq!(normalise_content("color colors\n"), "color colors\n");
    }

    #[test]
    fn word_boundaries_respected() {
        // `licenseKey` has no word boundary after `license`, so the
        // identifier survives untouched.
        assert_eq!(normalise_content("set licenseKey here\n"), "set licenseKey here\n");
    }

    #[test]
    fn protected_identifiers_untouched() {
        assert_eq!(
            normalise_content("Subscribe to BehaviorSubject updates.\n"),
            "Subscribe to BehaviorSubject updates.\n"
        );
    }

    #[test]
    fn inline_code_spans_untouched() {
        assert_eq!(
            normalise_content("Use `behavior` for the behavior.\n"),
            "Use `behavior` for the behaviour.\n"
        );
    }

    #[test]
    fn fenced_blocks_untouched() {
        let input = "```js\nconst behavior = 1;\n```\nplain behavior\n";
        let expected = "```js\nconst behavior = 1;\n```\nplain behaviour\n";
        assert_eq!(normalise_content(input), expected);
    }

    #[test]
    fn frontmatter_untouched() {
        let input = "---\nlicense: MIT\n---\nThe license text.\n";
        let expected = "---\nlicense: MIT\n---\nThe licence text.\n";
        assert_eq!(normalise_content(input), expected);
    }

    #[test]
    fn crlf_endings_preserved() {
        assert_eq!(
            normalise_content("Plain prose line.\r\nAnother line.\r\n"),
            "Plain prose line.\r\nAnother line.\r\n"
        );
        assert_eq!(
            normalise_content("Check the behavior here.\r\n"),
            "Check the behaviour here.\r\n"
        );
    }

    #[test]
    fn crlf_file_without_us_spellings_not_changed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "No edits needed.\r\n").unwrap();
        let result = normalise_file(&path).unwrap();
        assert!(!result.changed);
    }

    #[test]
    fn idempotent() {
        let once = normalise_content("analyze the behavior\n");
        assert_eq!(normalise_content(&once), once);
    }

    #[test]
    fn normalise_file_reports_changed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "optimize this\n").unwrap();
        let result = normalise_file(&path).unwrap();
        assert!(result.changed);
        assert_eq!(result.content, "optimise this\n");
    }

    #[test]
    fn normalise_file_unchanged_when_already_uk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "optimise this\n").unwrap();
        let result = normalise_file(&path).unwrap();
        assert!(!result.changed);
    }

    #[test]
    fn normalise_file_unreadable_is_error() {
        assert!(normalise_file(Path::new("/nonexistent/a.md")).is_err());
    }
}
