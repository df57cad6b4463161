use std::path::{Path, PathBuf};

use curator::fs_util::write_if_changed;
use curator::manifest::{CollectionManifest, ItemKind};
use curator::renderer::{
    kind_directory, kind_heading, render_asset_table, render_collection_items,
    render_collections_table,
};
use curator::validator::list_manifest_files;

pub(crate) fn run(
    root: &Path,
    chatmodes: bool,
    agents: bool,
    collections: bool,
    output: Option<PathBuf>,
) {
    let mut kinds = vec![ItemKind::Prompt, ItemKind::Instruction];
    if chatmodes {
        kinds.push(ItemKind::ChatMode);
    }
    if agents {
        kinds.push(ItemKind::Agent);
    }

    let mut content = String::new();
    for kind in kinds {
        let dir_name = kind_directory(kind);
        content.push_str(&format!("## {}\n\n", kind_heading(kind)));
        content.push_str(&render_asset_table(kind, &root.join(dir_name), dir_name));
        content.push('\n');
    }

    if collections {
        let collections_dir = root.join("collections");
        content.push_str("## Collections\n\n");
        content.push_str(&render_collections_table(&collections_dir));
        content.push('\n');
        for path in list_manifest_files(&collections_dir) {
            let Some(manifest) = CollectionManifest::load(&path) else {
                continue;
            };
            content.push_str(&format!(
                "### {}\n\n{}\n\n",
                manifest.name, manifest.description
            ));
            content.push_str(&render_collection_items(&manifest, root));
            content.push('\n');
        }
    }

    match output {
        Some(output_path) => match write_if_changed(&output_path, &content) {
            Ok(true) => eprintln!("Updated {}", output_path.display()),
            Ok(false) => eprintln!("Unchanged {}", output_path.display()),
            Err(e) => {
                eprintln!("curator generate: failed to write {}: {e}", output_path.display());
                std::process::exit(1);
            }
        },
        None => print!("{content}"),
    }
}
