use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::EventStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the directory holding the database
///  - the `events` table for the configured column mapping
pub fn handle(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    cfg.init_all(config_path, cli.test)?;

    info("Initializing fraudstore…");
    if !cli.test {
        info(format!("Config file : {}", config_path.display()));
    }
    info(format!("Database    : {}", cfg.database.name));

    let mut store = EventStore::from_config(cfg)?;
    store.init_schema()?;
    let version = store.schema_version()?;
    store.close()?;

    success(format!(
        "Events table ready ({} mapped columns, mapping v{}, schema v{})",
        store.mapping().expected_len(),
        store.mapping().version,
        version
    ));
    Ok(())
}
