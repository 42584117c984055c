use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use srcmap::analysis::PatternExtractor;
use srcmap::model::Level;
use srcmap::scanner::{scan_project, IgnoreRuleSet};
use srcmap::snapshot::build_snapshot;
use srcmap::store::{publish, validate_project_name, FsStore, RegistryStore};

#[derive(Parser)]
#[command(name = "srcmap")]
#[command(version)]
#[command(about = "Inventory a source tree's imports and exports into versioned snapshots", long_about = None)]
struct Cli {
    /// Directory holding the registry and per-level snapshot folders
    #[arg(long, global = true, env = "SRCMAP_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Log per-file decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a source tree and store a new snapshot of the project
    Scan {
        /// Root folder of the source tree
        root: PathBuf,

        /// Project name, used as its directory and registry key
        project: String,

        /// Level tag: L1, L2, L3, L4 or N
        #[arg(default_value_t = Level::L1)]
        level: Level,
    },
    /// List registered projects and their latest snapshots
    List,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "srcmap=debug" } else { "srcmap=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut store = FsStore::open(&cli.data_dir)
        .with_context(|| format!("Failed to open data directory {}", cli.data_dir.display()))?;

    match cli.command {
        Commands::Scan {
            root,
            project,
            level,
        } => {
            validate_project_name(&project)?;

            let files = scan_project(&root, &IgnoreRuleSet::default(), &PatternExtractor)
                .with_context(|| format!("Failed to scan {}", root.display()))?;
            let snapshot = build_snapshot(project, level, files);

            let publication = publish(&mut store, &snapshot)
                .context("Failed to store snapshot")?;
            println!("Saved: {}", publication.location.display());
        }
        Commands::List => {
            let registry = store.load_registry().context("Failed to read registry")?;
            if registry.is_empty() {
                println!("No projects registered in {}", store.root().display());
            }
            for entry in registry.entries() {
                println!(
                    "{:<24} {:<3} v{}  {}",
                    entry.name,
                    entry.level,
                    entry.latest_version,
                    entry.latest_snapshot_path()
                );
            }
        }
    }

    Ok(())
}
