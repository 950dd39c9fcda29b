use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::EventStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        info: show_info,
        migrate,
    } = cmd
    {
        let mut store = EventStore::from_config(cfg)?;

        if *migrate {
            info("Running migrations…");
            store.init_schema()?;
            success("Migration completed.");
        }

        if *show_info {
            let db = &cfg.database;
            println!("host           : {}", db.host);
            println!("database       : {}", db.name);
            println!("user           : {}", db.user);
            println!("password       : {}", db.masked_password());
            println!("busy timeout   : {} ms", db.busy_timeout_ms);
            println!("schema version : {}", store.schema_version()?);
            println!(
                "mapping        : v{} ({} columns)",
                store.mapping().version,
                store.mapping().expected_len()
            );
            println!("events         : {}", store.count()?);
        }

        store.close()?;
    }
    Ok(())
}
