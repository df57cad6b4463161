use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod audit;
mod generate;
mod init;
mod normalise;
mod validate;

#[derive(Parser)]
#[command(
    name = "curator",
    version,
    about = "Markdown asset collection curator and validator"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show project information
    #[arg(long)]
    about: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate collection manifests in a directory
    Validate {
        /// Collections directory (default: ./collections)
        dir: Option<PathBuf>,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate README tables for asset directories and collections
    Generate {
        /// Repository root containing the asset directories
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Include the chat modes table
        #[arg(long)]
        chatmodes: bool,
        /// Include the agents table
        #[arg(long)]
        agents: bool,
        /// Include the collections tables
        #[arg(long)]
        collections: bool,
        /// Write output to file instead of stdout (only if changed)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Audit internal markdown links under a root
    Audit {
        /// Root directory to scan (default: current directory)
        root: Option<PathBuf>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalise US spellings to UK English in markdown prose
    #[command(alias = "normalize")]
    Normalise {
        /// Explicit files to process (default: all .md under cwd)
        paths: Vec<PathBuf>,
        /// Write changes in place (default: dry run)
        #[arg(long)]
        apply: bool,
        /// Show a unified diff for each changed file
        #[arg(long)]
        diff: bool,
    },
    /// Create a template collection manifest
    Init {
        /// Collection id (lowercase alphanumeric and hyphens)
        id: String,
        /// Collection name (default: derived from the id)
        #[arg(long)]
        name: Option<String>,
        /// Collection description
        #[arg(long)]
        description: Option<String>,
        /// Seed tags, comma-separated (e.g. --tags wordpress,blocks)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Target directory (default: ./collections)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn print_about() {
    println!("curator: {}", env!("CARGO_PKG_VERSION"));
    println!("about: {}", env!("CARGO_PKG_DESCRIPTION"));
    println!("repository: {}", env!("CARGO_PKG_REPOSITORY"));
    println!("licence: https://opensource.org/licenses/MIT");
}

pub fn run() {
    let cli = Cli::parse();

    if cli.about {
        print_about();
        return;
    }

    match cli.command {
        Some(Commands::Validate { dir, json }) => validate::run(dir, json),
        Some(Commands::Generate {
            root,
            chatmodes,
            agents,
            collections,
            output,
        }) => generate::run(&root, chatmodes, agents, collections, output),
        Some(Commands::Audit { root, json }) => audit::run(root, json),
        Some(Commands::Normalise { paths, apply, diff }) => normalise::run(&paths, apply, diff),
        Some(Commands::Init {
            id,
            name,
            description,
            tags,
            dir,
        }) => init::run(&id, name, description, &tags, dir),
        None => {
            eprintln!("Usage: curator <command> (try --help)");
            std::process::exit(1);
        }
    }
}
