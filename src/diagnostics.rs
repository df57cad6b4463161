//! Structured diagnostics for manifest validation and error reporting.
//!
//! Replaces the ad-hoc `Vec<String>` pattern with typed diagnostics carrying
//! stable error codes, severity levels, and optional fix suggestions.

use std::fmt;

use serde::Serialize;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A rule violation that causes validation failure.
    Error,
    /// A potential issue that does not cause failure.
    Warning,
}

/// A structured diagnostic message from manifest validation.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Stable error code (e.g., `"E001"`, `"W001"`).
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Field that caused the diagnostic (e.g., `"id"`, `"items"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    /// Suggested fix (actionable text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with the given severity, code, and message.
    #[must_use]
    pub fn new(severity: Severity, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            field: None,
            suggestion: None,
        }
    }

    /// Set the field that caused this diagnostic.
    #[must_use]
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Set a suggested fix for this diagnostic.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Returns `true` if this diagnostic is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns `true` if this diagnostic is a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Display format:
/// - Errors: `"message"` (no prefix)
/// - Warnings: `"warning: message"`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "{}", self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

// ── Error code constants ────────────────────────────────────────────────

// Infrastructure errors (E000)

/// Infrastructure error (file not found, IO error, parse failure).
pub const E000: &str = "E000";

// Id validation errors (E001–E003)

/// Missing or non-string `id`.
pub const E001: &str = "E001";
/// Id contains invalid characters.
pub const E002: &str = "E002";
/// Id length out of range (1–50).
pub const E003: &str = "E003";

// Name validation errors (E004–E005)

/// Missing or non-string `name`.
pub const E004: &str = "E004";
/// Name length out of range (1–100).
pub const E005: &str = "E005";

// Description validation errors (E006–E007)

/// Missing or non-string `description`.
pub const E006: &str = "E006";
/// Description length out of range (1–500).
pub const E007: &str = "E007";

// Tags validation errors (E008–E010)

/// `tags` is not an array.
pub const E008: &str = "E008";
/// More than 10 tags.
pub const E009: &str = "E009";
/// Tag contains invalid characters or has invalid length.
pub const E010: &str = "E010";

// Items validation errors (E011–E016)

/// Missing or non-array `items`.
pub const E011: &str = "E011";
/// Item count out of range (1–50).
pub const E012: &str = "E012";
/// Item is missing its `path` field.
pub const E013: &str = "E013";
/// Item has a missing or unknown `kind`.
pub const E014: &str = "E014";
/// Item path does not exist on disk.
pub const E015: &str = "E015";
/// Item path extension does not match its kind.
pub const E016: &str = "E016";

// Display validation errors (E020–E022)

/// `display` is not an object.
pub const E020: &str = "E020";
/// `display.ordering` is not `alpha` or `manual`.
pub const E021: &str = "E021";
/// `display.show_badge` is not a boolean.
pub const E022: &str = "E022";

// Cross-file consistency codes (C001)

/// Duplicate collection id across manifest files.
pub const C001: &str = "C001";

// Warning codes (W001)

/// Unexpected top-level manifest field.
pub const W001: &str = "W001";
