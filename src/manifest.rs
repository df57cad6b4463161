//! Typed collection manifest model.
//!
//! A `*.collection.yml` file names a group of markdown assets. The
//! decoder produces a generic [`Mapping`]; this module gives it shape:
//! [`CollectionManifest`] with its items, tags, and display options,
//! plus the kind → allowed-path-suffix table shared by the validator
//! and the frontmatter extractor.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::decoder::{Mapping, Value};

/// The category of a collection item, constraining its file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Prompt,
    Instruction,
    ChatMode,
    Agent,
}

impl ItemKind {
    /// All kinds, in display order.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Prompt,
        ItemKind::Instruction,
        ItemKind::ChatMode,
        ItemKind::Agent,
    ];

    /// Parse the manifest spelling of a kind.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "prompt" => Some(ItemKind::Prompt),
            "instruction" => Some(ItemKind::Instruction),
            "chat-mode" => Some(ItemKind::ChatMode),
            "agent" => Some(ItemKind::Agent),
            _ => None,
        }
    }

    /// The manifest spelling of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Prompt => "prompt",
            ItemKind::Instruction => "instruction",
            ItemKind::ChatMode => "chat-mode",
            ItemKind::Agent => "agent",
        }
    }

    /// File suffixes accepted for this kind. Both the legacy singular
    /// and the plural forms are accepted during the migration window.
    #[must_use]
    pub fn suffixes(self) -> &'static [&'static str] {
        match self {
            ItemKind::Prompt => &[".prompt.md", ".prompts.md"],
            ItemKind::Instruction => &[".instructions.md"],
            ItemKind::ChatMode => &[".chatmode.md", ".chatmodes.md"],
            ItemKind::Agent => &[".agent.md", ".agents.md"],
        }
    }

    /// Returns `true` if `path` ends in a suffix allowed for this kind.
    #[must_use]
    pub fn matches_path(self, path: &str) -> bool {
        self.suffixes().iter().any(|s| path.ends_with(s))
    }
}

/// Returns the known asset suffix a filename ends with, if any.
#[must_use]
pub fn known_asset_suffix(filename: &str) -> Option<&'static str> {
    ItemKind::ALL
        .iter()
        .flat_map(|kind| kind.suffixes().iter())
        .find(|suffix| filename.ends_with(*suffix))
        .copied()
}

/// One asset reference inside a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionItem {
    /// Path relative to the repository root.
    pub path: String,
    pub kind: ItemKind,
}

/// Item ordering for collection display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Sort item rows by resolved title.
    Alpha,
    /// Preserve manifest order (the default).
    #[default]
    Manual,
}

/// Optional display options for a collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DisplayConfig {
    pub ordering: Ordering,
    pub show_badge: bool,
}

/// A parsed collection manifest. Ephemeral: reconstructed from its
/// file on every read, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionManifest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub items: Vec<CollectionItem>,
    pub display: DisplayConfig,
}

/// Normalize a display option token: strip an inline `#` comment, then
/// one layer of surrounding quotes.
#[must_use]
pub fn normalize_display_token(raw: &str) -> String {
    let no_comment = match raw.find('#') {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let trimmed = no_comment.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalize a display value to a boolean: accepts a decoded boolean
/// or the (possibly quoted) tokens `true`/`false`.
#[must_use]
pub fn normalize_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Scalar(s) => match normalize_display_token(s).as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

impl DisplayConfig {
    /// Build a display config from a decoded `display` mapping,
    /// defaulting unparseable or absent options.
    #[must_use]
    pub fn from_mapping(map: &HashMap<String, Value>) -> Self {
        let ordering = map
            .get("ordering")
            .and_then(Value::as_scalar)
            .map(|raw| normalize_display_token(raw))
            .and_then(|token| match token.as_str() {
                "alpha" => Some(Ordering::Alpha),
                "manual" => Some(Ordering::Manual),
                _ => None,
            })
            .unwrap_or_default();
        let show_badge = map
            .get("show_badge")
            .and_then(normalize_bool)
            .unwrap_or(false);
        Self {
            ordering,
            show_badge,
        }
    }
}

impl CollectionManifest {
    /// Convert a decoded mapping into a typed manifest.
    ///
    /// Intended for mappings that already passed validation; returns
    /// `None` when a required scalar is missing and silently drops
    /// items without a valid `path`/`kind` pair.
    #[must_use]
    pub fn from_mapping(map: &Mapping) -> Option<Self> {
        let scalar = |key: &str| {
            map.get(key)
                .and_then(Value::as_scalar)
                .map(str::to_string)
        };
        let id = scalar("id")?;
        let name = scalar("name")?;
        let description = scalar("description")?;

        let tags = map
            .get("tags")
            .and_then(Value::as_sequence)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let items: Vec<CollectionItem> = map
            .get("items")
            .and_then(Value::as_objects)
            .map(|objects| {
                objects
                    .iter()
                    .filter_map(|obj| {
                        let path = obj.get("path")?.clone();
                        let kind = ItemKind::parse(obj.get("kind")?)?;
                        Some(CollectionItem { path, kind })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let display = map
            .get("display")
            .and_then(Value::as_mapping)
            .map(DisplayConfig::from_mapping)
            .unwrap_or_default();

        Some(Self {
            id,
            name,
            description,
            tags,
            items,
            display,
        })
    }

    /// Load and convert a manifest file. Parse failures and shape
    /// mismatches collapse to `None` (already reported by the decoder).
    #[must_use]
    pub fn load(path: &Path) -> Option<Self> {
        let map = crate::decoder::decode_file(path)?;
        Self::from_mapping(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn kind_parse_round_trip() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn kind_parse_rejects_unknown() {
        assert_eq!(ItemKind::parse("gizmo"), None);
        assert_eq!(ItemKind::parse("chatmode"), None);
    }

    #[test]
    fn prompt_accepts_both_suffix_forms() {
        assert!(ItemKind::Prompt.matches_path("a/b.prompt.md"));
        assert!(ItemKind::Prompt.matches_path("a/b.prompts.md"));
        assert!(!ItemKind::Prompt.matches_path("a/b.instructions.md"));
    }

    #[test]
    fn instruction_accepts_single_form() {
        assert!(ItemKind::Instruction.matches_path("x.instructions.md"));
        assert!(!ItemKind::Instruction.matches_path("x.instruction.md"));
    }

    #[test]
    fn known_asset_suffix_matches() {
        assert_eq!(known_asset_suffix("a.chatmode.md"), Some(".chatmode.md"));
        assert_eq!(known_asset_suffix("a.agents.md"), Some(".agents.md"));
        assert_eq!(known_asset_suffix("README.md"), None);
    }

    #[test]
    fn normalize_display_token_strips_comment_and_quotes() {
        assert_eq!(normalize_display_token("'alpha' # sorted"), "alpha");
        assert_eq!(normalize_display_token("manual"), "manual");
        assert_eq!(normalize_display_token("\"manual\""), "manual");
    }

    #[test]
    fn normalize_bool_accepts_coerced_and_quoted() {
        assert_eq!(normalize_bool(&Value::Bool(true)), Some(true));
        assert_eq!(normalize_bool(&Value::Scalar("'false'".into())), Some(false));
        assert_eq!(normalize_bool(&Value::Scalar("yes".into())), None);
    }

    #[test]
    fn from_mapping_full_manifest() {
        let text = "\
id: wp-core
name: WP Core
description: Core assets
tags: [wordpress, core]
items:
  - path: prompts/a.prompt.md
    kind: prompt
display:
  ordering: alpha
  show_badge: true
";
        let manifest = CollectionManifest::from_mapping(&decode(text)).unwrap();
        assert_eq!(manifest.id, "wp-core");
        assert_eq!(manifest.tags, vec!["wordpress", "core"]);
        assert_eq!(manifest.items.len(), 1);
        assert_eq!(manifest.items[0].kind, ItemKind::Prompt);
        assert_eq!(manifest.display.ordering, Ordering::Alpha);
        assert!(manifest.display.show_badge);
    }

    #[test]
    fn from_mapping_defaults_optional_fields() {
        let manifest =
            CollectionManifest::from_mapping(&decode("id: a\nname: b\ndescription: c\n")).unwrap();
        assert!(manifest.tags.is_empty());
        assert!(manifest.items.is_empty());
        assert_eq!(manifest.display.ordering, Ordering::Manual);
        assert!(!manifest.display.show_badge);
    }

    #[test]
    fn from_mapping_missing_id_is_none() {
        assert!(CollectionManifest::from_mapping(&decode("name: b\ndescription: c\n")).is_none());
    }

    #[test]
    fn from_mapping_drops_items_with_bad_kind() {
        let text = "id: a\nname: b\ndescription: c\nitems:\n  - path: x.prompt.md\n    kind: gizmo\n";
        let manifest = CollectionManifest::from_mapping(&decode(text)).unwrap();
        assert!(manifest.items.is_empty());
    }

    #[test]
    fn serialize_kind_kebab_case() {
        let json = serde_json::to_value(ItemKind::ChatMode).unwrap();
        assert_eq!(json, "chat-mode");
    }
}
