//! README table generation.
//!
//! Renders deterministic markdown tables for asset directories and
//! collection manifests. Output is stable across runs over an
//! unchanged tree, so callers can pair it with
//! [`crate::fs_util::write_if_changed`] for diff-free automation.

use std::path::{Path, PathBuf};

use crate::frontmatter::{extract_description, extract_title, filename_title, frontmatter_scalar, is_deprecated};
use crate::fs_util::is_regular_file;
use crate::manifest::{CollectionManifest, ItemKind, Ordering};
use crate::validator::list_manifest_files;

/// Conventional directory name for each asset kind.
#[must_use]
pub fn kind_directory(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Prompt => "prompts",
        ItemKind::Instruction => "instructions",
        ItemKind::ChatMode => "chatmodes",
        ItemKind::Agent => "agents",
    }
}

/// Section heading for each asset kind.
#[must_use]
pub fn kind_heading(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Prompt => "Prompts",
        ItemKind::Instruction => "Instructions",
        ItemKind::ChatMode => "Chat Modes",
        ItemKind::Agent => "Agents",
    }
}

/// Percent-encode the characters that commonly break markdown links
/// in filenames.
fn encode_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape table-breaking pipes in cell text.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Install-badge markup appended to a title cell.
fn install_badge(link: &str) -> String {
    format!(
        "<br />[![Install in VS Code](https://img.shields.io/badge/VS_Code-Install-0098FF)]({link})"
    )
}

/// Join a link prefix with an encoded filename.
fn asset_link(link_prefix: &str, filename: &str) -> String {
    let encoded = encode_filename(filename);
    if link_prefix.is_empty() {
        encoded
    } else {
        format!("{}/{encoded}", link_prefix.trim_end_matches('/'))
    }
}

/// List asset files of one kind directly inside `dir`, sorted
/// lexicographically by filename.
fn list_asset_files(kind: ItemKind, dir: &Path) -> Vec<PathBuf> {
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
                    .is_some_and(|n| kind.matches_path(n))
        })
        .collect();
    files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    files
}

/// Description cell for one asset, applying the instructions fallback
/// phrase when the frontmatter has none.
fn asset_description(kind: ItemKind, path: &Path) -> String {
    match extract_description(path) {
        Some(desc) => desc,
        None if kind == ItemKind::Instruction => {
            let topic = filename_title(path);
            format!("{topic} specific coding standards and best practices")
        }
        None => String::new(),
    }
}

/// Render the asset table for one kind.
///
/// One row per matching, non-deprecated file in `dir` (sorted by
/// filename); deprecated files are skipped with a stderr note. The
/// title links to `link_prefix` joined with the encoded filename.
/// Agents get a three-column table with a Domain column sourced from
/// the frontmatter `domain:` field.
#[must_use]
pub fn render_asset_table(kind: ItemKind, dir: &Path, link_prefix: &str) -> String {
    let mut out = String::new();
    if kind == ItemKind::Agent {
        out.push_str("| Agent | Domain | Description |\n");
        out.push_str("| ----- | ------ | ----------- |\n");
    } else {
        out.push_str("| Title | Description |\n");
        out.push_str("| ----- | ----------- |\n");
    }

    let mut rows = 0;
    for path in list_asset_files(kind, dir) {
        if is_deprecated(&path) {
            eprintln!("Skipping deprecated asset: {}", path.display());
            continue;
        }
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let link = asset_link(link_prefix, filename);
        let title = escape_cell(&extract_title(&path));
        let description = escape_cell(&asset_description(kind, &path));
        let badge = install_badge(&link);

        if kind == ItemKind::Agent {
            let domain = frontmatter_scalar(&path, "domain")
                .unwrap_or_else(|| "General".to_string());
            out.push_str(&format!(
                "| [{title}]({link}){badge} | {} | {description} |\n",
                escape_cell(&domain)
            ));
        } else {
            out.push_str(&format!("| [{title}]({link}){badge} | {description} |\n"));
        }
        rows += 1;
    }

    if rows == 0 {
        out.push_str("\n_No entries found yet._\n");
    }
    out
}

/// Render the collections summary table: one row per manifest in
/// `collections_dir` (sorted by filename) that converts to a typed
/// manifest.
#[must_use]
pub fn render_collections_table(collections_dir: &Path) -> String {
    let mut out = String::new();
    out.push_str("| Name | Description | Items | Tags |\n");
    out.push_str("| ---- | ----------- | ----- | ---- |\n");

    let mut rows = 0;
    for path in list_manifest_files(collections_dir) {
        let Some(manifest) = CollectionManifest::load(&path) else {
            continue;
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&manifest.name),
            escape_cell(&manifest.description),
            manifest.items.len(),
            escape_cell(&manifest.tags.join(", "))
        ));
        rows += 1;
    }

    if rows == 0 {
        out.push_str("\n_No entries found yet._\n");
    }
    out
}

/// Render the item table for one collection.
///
/// Item paths resolve against `base_dir` for frontmatter lookups.
/// `display.ordering == alpha` sorts rows by resolved title
/// (case-insensitive); `manual` or unset preserves manifest order.
/// `display.show_badge` gates the install badge on item rows.
/// Deprecated items are skipped with a stderr note.
#[must_use]
pub fn render_collection_items(manifest: &CollectionManifest, base_dir: &Path) -> String {
    let mut resolved: Vec<(String, String, String)> = Vec::new();
    for item in &manifest.items {
        let path = base_dir.join(&item.path);
        if is_deprecated(&path) {
            eprintln!("Skipping deprecated asset: {}", path.display());
            continue;
        }
        let title = extract_title(&path);
        let description = asset_description(item.kind, &path);
        resolved.push((title, item.path.clone(), description));
    }

    if manifest.display.ordering == Ordering::Alpha {
        resolved.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
    }

    let mut out = String::new();
    out.push_str("| Title | Description |\n");
    out.push_str("| ----- | ----------- |\n");
    for (title, path, description) in &resolved {
        let link = encode_filename(path);
        let badge = if manifest.display.show_badge {
            install_badge(&link)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "| [{}]({link}){badge} | {} |\n",
            escape_cell(title),
            escape_cell(description)
        ));
    }
    if resolved.is_empty() {
        out.push_str("\n_No entries found yet._\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{CollectionItem, DisplayConfig};
    use std::fs;
    use tempfile::tempdir;

    fn write_prompt(dir: &Path, name: &str, title: &str, desc: Option<&str>) {
        let desc_line = desc.map(|d| format!("description: {d}\n")).unwrap_or_default();
        fs::write(
            dir.join(name),
            format!("---\ntitle: {title}\n{desc_line}---\nBody\n"),
        )
        .unwrap();
    }

    #[test]
    fn renders_rows_sorted_by_filename() {
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "b.prompt.md", "Second", Some("B"));
        write_prompt(dir.path(), "a.prompt.md", "First", Some("A"));
        let table = render_asset_table(ItemKind::Prompt, dir.path(), "prompts");
        let first = table.find("First").unwrap();
        let second = table.find("Second").unwrap();
        assert!(first < second);
        assert!(table.contains("[First](prompts/a.prompt.md)"));
    }

    #[test]
    fn skips_deprecated_assets() {
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "live.prompt.md", "Live", Some("x"));
        fs::write(
            dir.path().join("old.prompt.md"),
            "---\ntitle: Old\ndeprecated: true\n---\n",
        )
        .unwrap();
        let table = render_asset_table(ItemKind::Prompt, dir.path(), "prompts");
        assert!(table.contains("Live"));
        assert!(!table.contains("Old"));
    }

    #[test]
    fn empty_directory_emits_header_and_placeholder() {
        let dir = tempdir().unwrap();
        let table = render_asset_table(ItemKind::Prompt, dir.path(), "prompts");
        assert!(table.starts_with("| Title | Description |"));
        assert!(table.contains("_No entries found yet._"));
    }

    #[test]
    fn instruction_description_fallback_phrase() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("block-theme.instructions.md"),
            "---\ntitle: Block Theme\n---\n",
        )
        .unwrap();
        let table = render_asset_table(ItemKind::Instruction, dir.path(), "instructions");
        assert!(table.contains("Block Theme specific coding standards and best practices"));
    }

    #[test]
    fn agent_table_has_domain_column() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("perf.agent.md"),
            "---\ntitle: Perf Agent\ndomain: Performance\ndescription: Tunes things\n---\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("misc.agent.md"),
            "---\ntitle: Misc Agent\ndescription: Does things\n---\n",
        )
        .unwrap();
        let table = render_asset_table(ItemKind::Agent, dir.path(), "agents");
        assert!(table.starts_with("| Agent | Domain | Description |"));
        assert!(table.contains("| Performance |"));
        assert!(table.contains("| General |"));
    }

    #[test]
    fn filename_with_spaces_encoded_in_link() {
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "two words.prompt.md", "Two Words", Some("x"));
        let table = render_asset_table(ItemKind::Prompt, dir.path(), "prompts");
        assert!(table.contains("(prompts/two%20words.prompt.md)"));
    }

    #[test]
    fn filename_with_parens_encoded_in_link() {
        // An unencoded `)` would terminate the markdown link target.
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "setup (v2).prompt.md", "Setup", Some("x"));
        let table = render_asset_table(ItemKind::Prompt, dir.path(), "prompts");
        assert!(table.contains("(prompts/setup%20%28v2%29.prompt.md)"));
    }

    #[test]
    fn pipes_in_description_escaped() {
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "a.prompt.md", "A", Some("\"left | right\""));
        let table = render_asset_table(ItemKind::Prompt, dir.path(), "prompts");
        assert!(table.contains("left \\| right"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "a.prompt.md", "A", Some("x"));
        write_prompt(dir.path(), "b.prompt.md", "B", None);
        let first = render_asset_table(ItemKind::Prompt, dir.path(), "prompts");
        let second = render_asset_table(ItemKind::Prompt, dir.path(), "prompts");
        assert_eq!(first, second);
    }

    // ── collections ──────────────────────────────────────────────────

    #[test]
    fn collections_table_shape() {
        let dir = tempdir().unwrap();
        let collections = dir.path().join("collections");
        fs::create_dir(&collections).unwrap();
        fs::write(
            collections.join("wp.collection.yml"),
            "id: wp\nname: WP Stuff\ndescription: All of it\ntags: [wordpress]\nitems:\n  - path: a.prompt.md\n    kind: prompt\n",
        )
        .unwrap();
        let table = render_collections_table(&collections);
        assert!(table.starts_with("| Name | Description | Items | Tags |"));
        assert!(table.contains("| WP Stuff | All of it | 1 | wordpress |"));
    }

    #[test]
    fn collections_table_empty_placeholder() {
        let dir = tempdir().unwrap();
        let table = render_collections_table(dir.path());
        assert!(table.contains("_No entries found yet._"));
    }

    fn item(path: &str) -> CollectionItem {
        CollectionItem {
            path: path.to_string(),
            kind: ItemKind::Prompt,
        }
    }

    fn manifest_with(items: Vec<CollectionItem>, display: DisplayConfig) -> CollectionManifest {
        CollectionManifest {
            id: "c".into(),
            name: "C".into(),
            description: "d".into(),
            tags: vec![],
            items,
            display,
        }
    }

    #[test]
    fn collection_items_manual_order_preserved() {
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "z.prompt.md", "Zulu", Some("z"));
        write_prompt(dir.path(), "a.prompt.md", "Alpha", Some("a"));
        let manifest = manifest_with(
            vec![item("z.prompt.md"), item("a.prompt.md")],
            DisplayConfig::default(),
        );
        let table = render_collection_items(&manifest, dir.path());
        assert!(table.find("Zulu").unwrap() < table.find("Alpha").unwrap());
    }

    #[test]
    fn collection_items_alpha_sorted_by_title() {
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "z.prompt.md", "Zulu", Some("z"));
        write_prompt(dir.path(), "a.prompt.md", "alpha", Some("a"));
        let manifest = manifest_with(
            vec![item("z.prompt.md"), item("a.prompt.md")],
            DisplayConfig {
                ordering: Ordering::Alpha,
                show_badge: false,
            },
        );
        let table = render_collection_items(&manifest, dir.path());
        // Case-insensitive: "alpha" sorts before "Zulu".
        assert!(table.find("alpha").unwrap() < table.find("Zulu").unwrap());
    }

    #[test]
    fn collection_items_badge_gated_by_show_badge() {
        let dir = tempdir().unwrap();
        write_prompt(dir.path(), "a.prompt.md", "A", Some("x"));
        let without = render_collection_items(
            &manifest_with(vec![item("a.prompt.md")], DisplayConfig::default()),
            dir.path(),
        );
        assert!(!without.contains("img.shields.io"));
        let with = render_collection_items(
            &manifest_with(
                vec![item("a.prompt.md")],
                DisplayConfig {
                    ordering: Ordering::Manual,
                    show_badge: true,
                },
            ),
            dir.path(),
        );
        assert!(with.contains("img.shields.io"));
    }
}
