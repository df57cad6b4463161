use std::path::PathBuf;

use curator::links::{audit, render_text};

pub(crate) fn run(root: Option<PathBuf>, json: bool) {
    let root = root.unwrap_or_else(|| PathBuf::from("."));
    let report = audit(&root);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("curator audit: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render_text(&report));
        if !report.is_clean() {
            println!("Run with --json for machine-readable output.");
        }
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
}
