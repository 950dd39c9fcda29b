//! fraudstore library root.
//! Exposes the `EventStore` data-access layer, its supporting modules and
//! the CLI entry point.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

pub use crate::core::EventStore;
pub use errors::{AppError, AppResult};
pub use models::mapping::ColumnMapping;
pub use models::outcome::AddOutcome;
pub use models::record::RawRecord;
pub use models::table::EventTable;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg, config_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Pending { .. } => cli::commands::pending::handle(&cli.command, cfg),
        Commands::Predict { .. } => cli::commands::predict::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Dispose { .. } => cli::commands::dispose::handle(&cli.command, cfg),
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = cli
        .config
        .as_deref()
        .map(utils::path::expand_tilde)
        .unwrap_or_else(Config::config_file);

    let mut cfg = Config::load_from(&config_path)?;
    if let Some(custom_db) = &cli.db {
        cfg.database.name = custom_db.clone();
    }

    dispatch(&cli, &cfg, &config_path)
}
