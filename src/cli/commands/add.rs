use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::outcome::AddOutcome;
use crate::models::record::RawRecord;
use crate::ui::messages::{error, success, warning};
use std::fs;
use std::io::{self, Read};

fn read_input(file: &str) -> AppResult<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(file)?)
    }
}

/// Ingest every record of the input file.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { file } = cmd {
        let records = RawRecord::parse_many(&read_input(file)?)?;
        let mut store = EventStore::from_config(cfg)?;

        let (mut inserted, mut skipped, mut failed) = (0usize, 0usize, 0usize);

        for (i, record) in records.iter().enumerate() {
            match store.add_event(record) {
                Ok(AddOutcome::Inserted(n)) => inserted += n,
                Ok(AddOutcome::DuplicateSkipped) => skipped += 1,
                Err(e) => {
                    failed += 1;
                    error(format!("record {}: {e}", i + 1));
                }
            }
        }

        store.close()?;

        if skipped > 0 {
            warning(format!("{skipped} record(s) already in db - skipped"));
        }
        success(format!("{inserted} event(s) added"));

        if failed > 0 {
            return Err(AppError::Validation(format!(
                "{failed} of {} record(s) could not be added",
                records.len()
            )));
        }
    }

    Ok(())
}
