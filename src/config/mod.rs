use crate::errors::{AppError, AppResult};
use crate::export::OutputFormat;
use crate::models::mapping::ColumnMapping;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Connection parameters of the events database.
///
/// The embedded backend only uses `name` (the database file, or `:memory:`).
/// `host`, `user` and `password` are kept so existing deployment configs
/// load unchanged; they show up in diagnostics, the password masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

fn default_host() -> String {
    "database_host".to_string()
}
fn default_name() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_user() -> String {
    "username".to_string()
}
fn default_password() -> String {
    "password".to_string()
}
fn default_busy_timeout() -> u64 {
    5_000
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            name: default_name(),
            user: default_user(),
            password: default_password(),
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl DbSettings {
    pub fn masked_password(&self) -> &'static str {
        if self.password.is_empty() { "" } else { "********" }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DbSettings,
    /// YAML column mapping; the built-in version 1 mapping when unset.
    #[serde(default)]
    pub mapping_file: Option<String>,
    #[serde(default)]
    pub default_format: OutputFormat,
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fraudstore")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("fraudstore.yaml")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("events.sqlite")
    }

    /// Load a configuration file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Column mapping named by the config, or the built-in one.
    pub fn column_mapping(&self) -> AppResult<ColumnMapping> {
        match &self.mapping_file {
            Some(file) => ColumnMapping::load(&expand_tilde(file)),
            None => Ok(ColumnMapping::default()),
        }
    }

    /// Prepare configuration and database location.
    ///
    /// Writes the config file unless `is_test`; always makes sure the
    /// directory that will hold the database exists.
    pub fn init_all(&self, config_path: &Path, is_test: bool) -> AppResult<()> {
        if !is_test {
            self.save_to(config_path)?;
        }

        let db_path = expand_tilde(&self.database.name);
        if self.database.name != crate::db::pool::IN_MEMORY
            && let Some(dir) = db_path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        Ok(())
    }
}
