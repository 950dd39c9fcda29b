use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        mapping,
    } = cmd
    {
        if *print_config {
            let mut shown = cfg.clone();
            shown.database.password = cfg.database.masked_password().to_string();
            print!("{}", serde_yaml::to_string(&shown)?);
        }

        if *mapping {
            print!("{}", serde_yaml::to_string(&cfg.column_mapping()?)?);
        }
    }
    Ok(())
}
