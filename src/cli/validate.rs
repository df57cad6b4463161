use std::path::PathBuf;

use curator::validator::validate_collections;

pub(crate) fn run(dir: Option<PathBuf>, json: bool) {
    let dir = dir.unwrap_or_else(|| PathBuf::from("collections"));
    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let report = validate_collections(&dir, &base_dir);

    if report.is_empty() {
        if json {
            println!("{}", serde_json::json!({ "files": [] }));
        } else {
            eprintln!(
                "No collection manifests found in {} (skipped).",
                dir.display()
            );
        }
        return;
    }

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("curator validate: {e}");
                std::process::exit(1);
            }
        }
    } else {
        for file in &report.files {
            if !file.parsed {
                eprintln!("{}: failed to parse", file.path.display());
                continue;
            }
            if !file.diagnostics.is_empty() {
                eprintln!("{}:", file.path.display());
                for d in &file.diagnostics {
                    eprintln!("  {d}");
                }
            }
        }
        let total = report.files.len();
        let failed = report.files.iter().filter(|f| f.has_errors()).count();
        eprintln!("{total} manifests: {} ok, {failed} with errors", total - failed);
    }

    if report.has_errors() {
        std::process::exit(1);
    }
}
