use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::EventStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dispose {
        event_id,
        disposition,
    } = cmd
    {
        let mut store = EventStore::from_config(cfg)?;
        let rows = store.set_disposition(*event_id, disposition)?;
        store.close()?;

        if rows == 0 {
            warning(format!("No event with id {event_id}"));
        } else {
            success(format!("Disposition '{disposition}' stored for event {event_id}"));
        }
    }
    Ok(())
}
