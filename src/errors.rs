//! Unified error type for the store, the ingest pipeline and the CLI.
//! Every public operation returns `AppResult` so callers can tell a failure
//! apart from an empty result or a skipped insert.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database connection lost: the store has been closed")]
    ConnectionLost,

    // ---------------------------
    // Input records
    // ---------------------------
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid value for column '{column}': {value:?} is not an epoch timestamp")]
    DataFormat { column: String, value: String },

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
