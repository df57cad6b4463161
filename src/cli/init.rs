use std::path::PathBuf;

use curator::frontmatter::filename_title;

pub(crate) fn run(
    id: &str,
    name: Option<String>,
    description: Option<String>,
    tags: &[String],
    dir: Option<PathBuf>,
) {
    let dir = dir.unwrap_or_else(|| PathBuf::from("collections"));
    let path = dir.join(format!("{id}.collection.yml"));
    if path.exists() {
        eprintln!("curator init: {} already exists", path.display());
        std::process::exit(1);
    }

    let name = name.unwrap_or_else(|| filename_title(&PathBuf::from(format!("{id}.md"))));
    let description = description.unwrap_or_else(|| "Describe this collection.".to_string());
    let tags = tags.join(", ");

    let content = format!(
        "id: {id}
name: {name}
description: {description}
tags: [{tags}]
items:
  - path: prompts/example.prompt.md
    kind: prompt
display:
  ordering: manual
  show_badge: false
"
    );

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("curator init: {e}");
        std::process::exit(1);
    }
    if let Err(e) = std::fs::write(&path, content) {
        eprintln!("curator init: {e}");
        std::process::exit(1);
    }
    println!("Created {}", path.display());
}
