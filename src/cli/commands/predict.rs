use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::EventStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Predict {
        event_id,
        prediction,
        probability,
    } = cmd
    {
        let mut store = EventStore::from_config(cfg)?;
        let rows = store.set_prediction(*event_id, prediction, *probability)?;
        store.close()?;

        if rows == 0 {
            warning(format!("No event with id {event_id}"));
        } else {
            success(format!(
                "Prediction '{prediction}' ({probability}) stored for event {event_id}"
            ));
        }
    }
    Ok(())
}
