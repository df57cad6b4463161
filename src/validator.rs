//! Collection manifest schema validation.
//!
//! Field rules are evaluated independently in a fixed order and all
//! violations are collected rather than short-circuited, so a manifest
//! author sees every problem in one pass. The only I/O is the per-item
//! filesystem existence probe.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::decoder::{decode_file, Mapping, Value};
use crate::diagnostics::{
    Diagnostic, Severity, C001, E000, E001, E002, E003, E004, E005, E006, E007, E008, E009, E010,
    E011, E012, E013, E014, E015, E016, E020, E021, E022, W001,
};
use crate::fs_util::is_regular_file;
use crate::manifest::{normalize_bool, normalize_display_token, ItemKind};

/// Allowed shape for `id` and tag entries.
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug regex must compile"));

/// Top-level manifest keys the schema knows about.
const KNOWN_KEYS: &[&str] = &["id", "name", "description", "tags", "items", "display"];

/// Manifest filename suffix.
pub const MANIFEST_SUFFIX: &str = ".collection.yml";

/// Validate a required scalar field with a character-count range.
fn validate_scalar_field(
    map: &Mapping,
    field: &'static str,
    max_len: usize,
    missing_code: &'static str,
    length_code: &'static str,
) -> Vec<Diagnostic> {
    match map.get(field) {
        Some(Value::Scalar(s)) => {
            let len = s.chars().count();
            if len == 0 || len > max_len {
                vec![Diagnostic::new(
                    Severity::Error,
                    length_code,
                    format!("{field} must be 1-{max_len} characters (got {len})"),
                )
                .with_field(field)]
            } else {
                vec![]
            }
        }
        Some(_) => vec![Diagnostic::new(
            Severity::Error,
            missing_code,
            format!("`{field}` must be a string"),
        )
        .with_field(field)],
        None => vec![Diagnostic::new(
            Severity::Error,
            missing_code,
            format!("missing required field `{field}`"),
        )
        .with_field(field)],
    }
}

/// Validate the `id` field: required, lowercase slug, 1–50 characters.
fn validate_id(map: &Mapping) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    match map.get("id") {
        Some(Value::Scalar(id)) => {
            let len = id.chars().count();
            if len == 0 || len > 50 {
                diags.push(
                    Diagnostic::new(
                        Severity::Error,
                        E003,
                        format!("id must be 1-50 characters (got {len})"),
                    )
                    .with_field("id"),
                );
            }
            if !id.is_empty() && !SLUG_RE.is_match(id) {
                diags.push(
                    Diagnostic::new(
                        Severity::Error,
                        E002,
                        format!("id '{id}' contains invalid characters"),
                    )
                    .with_field("id")
                    .with_suggestion("Use lowercase letters, digits, and hyphens only"),
                );
            }
        }
        Some(_) => diags.push(
            Diagnostic::new(Severity::Error, E001, "`id` must be a string").with_field("id"),
        ),
        None => diags.push(
            Diagnostic::new(Severity::Error, E001, "missing required field `id`").with_field("id"),
        ),
    }
    diags
}

/// Validate the optional `tags` field.
fn validate_tags(map: &Mapping) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let Some(value) = map.get("tags") else {
        return diags;
    };
    let Some(tags) = value.as_sequence() else {
        diags.push(
            Diagnostic::new(Severity::Error, E008, "`tags` must be an array").with_field("tags"),
        );
        return diags;
    };
    if tags.len() > 10 {
        diags.push(
            Diagnostic::new(
                Severity::Error,
                E009,
                format!("tags must have at most 10 entries (got {})", tags.len()),
            )
            .with_field("tags"),
        );
    }
    for (i, tag) in tags.iter().enumerate() {
        let len = tag.chars().count();
        if len == 0 || len > 30 || !SLUG_RE.is_match(tag) {
            diags.push(
                Diagnostic::new(
                    Severity::Error,
                    E010,
                    format!(
                        "tag {} ('{tag}') must be lowercase alphanumeric/hyphen, 1-30 characters",
                        i + 1
                    ),
                )
                .with_field("tags"),
            );
        }
    }
    diags
}

/// Validate one collection item. `index` is 1-based for messages.
fn validate_item(
    item: &HashMap<String, String>,
    index: usize,
    base_dir: &Path,
) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    let path = item.get("path");
    if path.is_none() {
        diags.push(
            Diagnostic::new(Severity::Error, E013, format!("Item {index}: missing `path`"))
                .with_field("items"),
        );
    }

    let kind = item.get("kind").and_then(|k| ItemKind::parse(k));
    if kind.is_none() {
        let kinds = ItemKind::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        diags.push(
            Diagnostic::new(
                Severity::Error,
                E014,
                format!("Item {index}: kind must be one of {kinds}"),
            )
            .with_field("items"),
        );
    }

    if let Some(path) = path {
        if !is_regular_file(&base_dir.join(path)) {
            diags.push(
                Diagnostic::new(
                    Severity::Error,
                    E015,
                    format!("Item {index}: path '{path}' does not exist"),
                )
                .with_field("items"),
            );
        }
        if let Some(kind) = kind {
            if !kind.matches_path(path) {
                let allowed = kind.suffixes().join(", ");
                diags.push(
                    Diagnostic::new(
                        Severity::Error,
                        E016,
                        format!(
                            "Item {index}: path '{path}' must end in {allowed} for kind '{}'",
                            kind.as_str()
                        ),
                    )
                    .with_field("items"),
                );
            }
        }
    }

    diags
}

/// Validate the required `items` field.
fn validate_items(map: &Mapping, base_dir: &Path) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    match map.get("items") {
        Some(Value::Objects(items)) => {
            if items.is_empty() || items.len() > 50 {
                diags.push(
                    Diagnostic::new(
                        Severity::Error,
                        E012,
                        format!("items must have 1-50 entries (got {})", items.len()),
                    )
                    .with_field("items"),
                );
            }
            for (i, item) in items.iter().enumerate() {
                diags.extend(validate_item(item, i + 1, base_dir));
            }
        }
        Some(_) => diags.push(
            Diagnostic::new(Severity::Error, E011, "`items` must be an array of objects")
                .with_field("items"),
        ),
        None => diags.push(
            Diagnostic::new(Severity::Error, E011, "missing required field `items`")
                .with_field("items"),
        ),
    }
    diags
}

/// Validate the optional `display` field.
fn validate_display(map: &Mapping) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let Some(value) = map.get("display") else {
        return diags;
    };
    let Some(display) = value.as_mapping() else {
        diags.push(
            Diagnostic::new(Severity::Error, E020, "`display` must be an object")
                .with_field("display"),
        );
        return diags;
    };

    if let Some(ordering) = display.get("ordering") {
        let token = ordering
            .as_scalar()
            .map(normalize_display_token)
            .unwrap_or_default();
        if token != "alpha" && token != "manual" {
            diags.push(
                Diagnostic::new(
                    Severity::Error,
                    E021,
                    "display.ordering must be 'alpha' or 'manual'",
                )
                .with_field("display"),
            );
        }
    }

    if let Some(show_badge) = display.get("show_badge") {
        if normalize_bool(show_badge).is_none() {
            diags.push(
                Diagnostic::new(Severity::Error, E022, "display.show_badge must be a boolean")
                    .with_field("display"),
            );
        }
    }

    diags
}

/// Validate a decoded manifest mapping against the collection schema.
///
/// Item paths are resolved against `base_dir` for the existence probe.
/// Evaluation order is fixed, so repeated calls on an unmodified
/// mapping return identical diagnostic lists.
///
/// Returns a list of diagnostics (empty = valid). Warnings (unknown
/// top-level fields) never fail validation.
#[must_use]
pub fn validate_manifest(map: &Mapping, base_dir: &Path) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    diags.extend(validate_id(map));
    diags.extend(validate_scalar_field(map, "name", 100, E004, E005));
    diags.extend(validate_scalar_field(map, "description", 500, E006, E007));
    diags.extend(validate_tags(map));
    diags.extend(validate_items(map, base_dir));
    diags.extend(validate_display(map));

    // Unknown top-level keys, sorted for deterministic output.
    let mut keys: Vec<_> = map.keys().collect();
    keys.sort();
    for key in keys {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            diags.push(
                Diagnostic::new(
                    Severity::Warning,
                    W001,
                    format!("unexpected manifest field: '{key}'"),
                ),
            );
        }
    }

    diags
}

/// Validation outcome for one manifest file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Manifest file path.
    pub path: PathBuf,
    /// `false` when the file could not be read or decoded at all.
    pub parsed: bool,
    /// Collected diagnostics (validation and duplicate-id errors).
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Returns `true` if this file failed to parse or has any
    /// error-severity diagnostic.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.parsed || self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Batch validation outcome for a collections directory.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    /// Per-file outcomes, sorted by filename.
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Returns `true` if any file failed to parse or validate. An
    /// empty batch (no manifest files) is a pass-through success.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileReport::has_errors)
    }

    /// Returns `true` if no manifest files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// List `*.collection.yml` files directly inside `dir`, sorted by
/// filename. An unreadable directory logs a warning and yields an
/// empty list.
#[must_use]
pub fn list_manifest_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("warning: {}: {e}", dir.display());
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            is_regular_file(p)
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(MANIFEST_SUFFIX))
        })
        .collect();
    files.sort();
    files
}

/// Validate every manifest in a collections directory.
///
/// Each file is decoded and validated independently; a parse failure
/// on one file never stops the batch. After the per-file pass, `id`
/// values are checked for pairwise distinctness: the first occurrence
/// wins and each later duplicate gets an error citing its file.
///
/// Item paths are resolved against `base_dir` (the CLI passes the
/// process working directory).
#[must_use]
pub fn validate_collections(dir: &Path, base_dir: &Path) -> BatchReport {
    let mut files = Vec::new();
    let mut seen_ids: HashMap<String, PathBuf> = HashMap::new();

    for path in list_manifest_files(dir) {
        let Some(map) = decode_file(&path) else {
            files.push(FileReport {
                path,
                parsed: false,
                diagnostics: vec![Diagnostic::new(
                    Severity::Error,
                    E000,
                    "failed to parse manifest",
                )],
            });
            continue;
        };

        let mut diagnostics = validate_manifest(&map, base_dir);

        if let Some(id) = map.get("id").and_then(Value::as_scalar) {
            if let Some(first) = seen_ids.get(id) {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Error,
                        C001,
                        format!(
                            "duplicate collection id '{id}' (first defined in {})",
                            first.display()
                        ),
                    )
                    .with_field("id"),
                );
            } else {
                seen_ids.insert(id.to_string(), path.clone());
            }
        }

        files.push(FileReport {
            path,
            parsed: true,
            diagnostics,
        });
    }

    BatchReport { files }
}
