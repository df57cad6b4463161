pub mod decoder;
pub mod diagnostics;
pub mod errors;
pub mod frontmatter;
pub mod fs_util;
pub mod links;
pub mod manifest;
pub mod renderer;
pub mod spelling;
pub mod validator;

// Re-export key types at crate root for convenience.
pub use decoder::{decode, decode_file, Mapping, Value};
pub use errors::{CuratorError, Result};
pub use frontmatter::{
    extract_description, extract_title, is_deprecated, read_frontmatter, FrontmatterRecord,
};
pub use fs_util::{list_markdown_files, write_if_changed};
pub use links::{audit, AuditReport};
pub use manifest::{CollectionItem, CollectionManifest, DisplayConfig, ItemKind};
pub use renderer::{render_asset_table, render_collection_items, render_collections_table};
pub use spelling::{normalise_content, normalise_file};
pub use validator::{validate_collections, validate_manifest, BatchReport, FileReport};
