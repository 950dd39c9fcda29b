use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::EventStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pending { format, out, force } = cmd {
        let mut store = EventStore::from_config(cfg)?;
        let table = store.pending_events()?;
        store.close()?;

        ExportLogic::emit(
            &table,
            format.unwrap_or(cfg.default_format),
            out.as_deref().map(Path::new),
            *force,
        )?;
    }
    Ok(())
}
