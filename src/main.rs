use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use questa::config::Config;
use questa::quest::QuestLog;
use questa::store::DataStore;

mod cli;

#[derive(Parser)]
#[command(name = "questa")]
#[command(about = "QUESTA - a gamified quest tracker for your terminal")]
#[command(version)]
struct Cli {
    /// Data directory (defaults to ~/.questa/ or the config's data_dir)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to the config file (defaults to ~/.questa/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new quest
    Add {
        /// Quest title
        title: String,

        /// Difficulty: easy, medium or hard
        #[arg(short = 'D', long, default_value = "medium")]
        difficulty: String,

        /// Priority: low, medium, high or critical
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List quests
    List {
        /// Only show quests with this status
        #[arg(short, long)]
        status: Option<String>,

        /// Only show quests with this difficulty
        #[arg(short = 'D', long)]
        difficulty: Option<String>,

        /// Only show quests with this priority
        #[arg(short, long)]
        priority: Option<String>,

        /// Sort by: created, title, difficulty, priority or status
        #[arg(long, default_value = "created")]
        sort: String,

        /// Sort ascending (oldest/lowest first)
        #[arg(long)]
        ascending: bool,
    },

    /// Complete a quest (accepts a unique id prefix)
    Done {
        /// Quest id or id prefix
        id: String,
    },

    /// Delete a quest (accepts a unique id prefix)
    Delete {
        /// Quest id or id prefix
        id: String,

        /// Delete even completed, active, or high-priority quests
        #[arg(long)]
        force: bool,
    },

    /// Show player statistics and level progress
    Stats,

    /// Show unlocked and locked badges
    Badges,

    /// Write a starter config file to ~/.questa/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::Init { force }) = &args.command {
        return cli::init(*force);
    }

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let data_dir = config.effective_data_dir(args.data_dir.as_deref());
    let store = DataStore::open(data_dir)?;
    let mut log = QuestLog::open(store);

    match args.command {
        None => questa::tui::run(log, &config),
        Some(Commands::Add {
            title,
            difficulty,
            priority,
            notes,
        }) => cli::add(&mut log, &title, &difficulty, &priority, notes),
        Some(Commands::List {
            status,
            difficulty,
            priority,
            sort,
            ascending,
        }) => cli::list(
            &log,
            status.as_deref(),
            difficulty.as_deref(),
            priority.as_deref(),
            &sort,
            ascending,
        ),
        Some(Commands::Done { id }) => cli::done(&mut log, &id),
        Some(Commands::Delete { id, force }) => cli::delete(&mut log, &id, force),
        Some(Commands::Stats) => cli::stats(&log),
        Some(Commands::Badges) => cli::badges(&log, &config),
        Some(Commands::Init { .. }) => unreachable!("handled above"),
    }
}
