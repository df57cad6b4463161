//! Minimal YAML subset decoder for `*.collection.yml` manifests.
//!
//! This is deliberately not a YAML parser. Collection manifests are
//! hand-authored and use a small, fixed shape: flat scalars, inline
//! arrays (`tags: [a, b]`), one list-of-objects (`items:`), and one
//! nested object (`display:`). The decoder handles exactly that shape
//! in a single forward pass and silently ignores anything else.
//!
//! Known limitation: indentation tracking is two levels deep. Deeper
//! nesting misparses silently rather than erroring.

use std::collections::HashMap;
use std::path::Path;

/// A decoded manifest value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A plain string scalar.
    Scalar(String),
    /// A boolean, coerced from the literal tokens `true`/`false` inside
    /// the `display` object.
    Bool(bool),
    /// An ordered sequence of strings (`tags`).
    Sequence(Vec<String>),
    /// An ordered sequence of flat string objects (`items`).
    Objects(Vec<HashMap<String, String>>),
    /// A one-level nested object (`display`).
    Mapping(HashMap<String, Value>),
}

impl Value {
    /// Returns the scalar string, if this value is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this value is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string sequence, if this value is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            Value::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the object list, if this value is a list of objects.
    #[must_use]
    pub fn as_objects(&self) -> Option<&[HashMap<String, String>]> {
        match self {
            Value::Objects(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested mapping, if this value is a mapping.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

/// A decoded top-level manifest mapping.
pub type Mapping = HashMap<String, Value>;

/// Parser context: which container the next line may extend.
///
/// One explicit state per open container replaces the ambient
/// `currentKey`/`currentArray`/`currentObject` bookkeeping the
/// line-oriented scan would otherwise need. Every transition is guarded
/// on the line shape, so an unexpected line falls through to the
/// ignore branch instead of corrupting an open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No open container; only top-level `key: value` lines apply.
    Top,
    /// `tags:` opened with an empty value; dash lines append strings.
    Tags,
    /// `items:` opened with an empty value; dash lines start objects.
    /// `open` is `true` once at least one item exists, allowing
    /// indented `key: value` lines to extend the most recent item.
    Items { open: bool },
    /// `display:` opened with an empty value; indented `key: value`
    /// lines populate the nested object.
    Display,
}

/// Number of leading space characters on a line.
fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ').count()
}

/// Split a `key: value` line at the first colon, trimming both halves.
///
/// Returns `None` if the line contains no colon.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(':')?;
    Some((line[..idx].trim(), line[idx + 1..].trim()))
}

/// Decode manifest text into a generic mapping.
///
/// Single forward pass, no backtracking. Blank lines and `#` comment
/// lines are skipped; lines that fit none of the supported shapes are
/// silently ignored (the format targets hand-authored manifests, so
/// the decoder is forgiving rather than strict).
#[must_use]
pub fn decode(text: &str) -> Mapping {
    let mut map = Mapping::new();
    let mut state = State::Top;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = leading_spaces(line);

        // Sequence item lines extend whichever container is open.
        if let Some(rest) = trimmed.strip_prefix("- ") {
            match state {
                State::Tags => {
                    if let Some(Value::Sequence(seq)) = map.get_mut("tags") {
                        seq.push(rest.trim().to_string());
                    }
                }
                State::Items { .. } => {
                    let mut obj = HashMap::new();
                    if let Some((k, v)) = split_key_value(rest) {
                        obj.insert(k.to_string(), v.to_string());
                    }
                    if let Some(Value::Objects(items)) = map.get_mut("items") {
                        items.push(obj);
                    }
                    state = State::Items { open: true };
                }
                // Dash line outside a known sequence context: unsupported.
                State::Top | State::Display => {}
            }
            continue;
        }

        let Some((key, value)) = split_key_value(trimmed) else {
            // No colon, no dash: malformed line, ignored.
            continue;
        };

        if indent == 0 {
            // A top-level key closes any open container.
            state = State::Top;
            if value.starts_with('[') && value.ends_with(']') {
                let inner = &value[1..value.len() - 1];
                let seq: Vec<String> = if inner.trim().is_empty() {
                    Vec::new()
                } else {
                    inner.split(',').map(|t| t.trim().to_string()).collect()
                };
                map.insert(key.to_string(), Value::Sequence(seq));
            } else if !value.is_empty() {
                map.insert(key.to_string(), Value::Scalar(value.to_string()));
            } else {
                match key {
                    "items" => {
                        map.insert(key.to_string(), Value::Objects(Vec::new()));
                        state = State::Items { open: false };
                    }
                    "tags" => {
                        map.insert(key.to_string(), Value::Sequence(Vec::new()));
                        state = State::Tags;
                    }
                    "display" => {
                        map.insert(key.to_string(), Value::Mapping(HashMap::new()));
                        state = State::Display;
                    }
                    // Empty value for any other key: stored as an empty
                    // scalar; continuation lines are unsupported.
                    _ => {
                        map.insert(key.to_string(), Value::Scalar(String::new()));
                    }
                }
            }
            continue;
        }

        // Indented `key: value` lines.
        match state {
            State::Items { open: true } if indent > 2 => {
                if let Some(Value::Objects(items)) = map.get_mut("items") {
                    if let Some(obj) = items.last_mut() {
                        obj.insert(key.to_string(), value.to_string());
                    }
                }
            }
            State::Display => {
                if let Some(Value::Mapping(display)) = map.get_mut("display") {
                    let v = match value {
                        "true" => Value::Bool(true),
                        "false" => Value::Bool(false),
                        other => Value::Scalar(other.to_string()),
                    };
                    display.insert(key.to_string(), v);
                }
            }
            // Indented line with no matching open container: ignored.
            _ => {}
        }
    }

    map
}

/// Decode a manifest file.
///
/// Any read failure is reported on stderr and collapses to `None`; the
/// caller treats the file as failed-to-parse, distinct from a
/// validation violation.
#[must_use]
pub fn decode_file(path: &Path) -> Option<Mapping> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(decode(&text)),
        Err(e) => {
            eprintln!("warning: {}: {e}", path.display());
            None
        }
    }
}
