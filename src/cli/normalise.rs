use std::path::PathBuf;

use similar::TextDiff;

use curator::fs_util::list_markdown_files;
use curator::spelling::normalise_file;

pub(crate) fn run(paths: &[PathBuf], apply: bool, diff: bool) {
    let targets: Vec<PathBuf> = if paths.is_empty() {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        list_markdown_files(&cwd)
    } else {
        paths.to_vec()
    };

    let mut changed: Vec<PathBuf> = Vec::new();
    for path in &targets {
        let result = match normalise_file(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("warning: {}: {e}", path.display());
                continue;
            }
        };
        if !result.changed {
            continue;
        }
        if diff {
            let original = std::fs::read_to_string(path).unwrap_or_default();
            let text_diff = TextDiff::from_lines(&original, &result.content);
            print!(
                "{}",
                text_diff
                    .unified_diff()
                    .header(&path.display().to_string(), &path.display().to_string())
            );
        }
        if apply {
            if let Err(e) = std::fs::write(path, &result.content) {
                eprintln!("warning: {}: {e}", path.display());
                continue;
            }
        }
        changed.push(path.clone());
    }

    if apply {
        println!("Applied UK English normalisation to files:");
    } else {
        println!("Dry run: files that would change (run with --apply to write):");
    }
    for path in &changed {
        println!("  {}", path.display());
    }
    println!("Total changed: {}", changed.len());
}
