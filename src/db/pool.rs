//! Scoped access to the single SQLite connection owned by a store.

use crate::config::DbSettings;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use rusqlite::{Connection, Transaction};
use std::time::Duration;
use tracing::{debug, warn};

pub const IN_MEMORY: &str = ":memory:";

/// Holds the connection for the lifetime of its owner.
///
/// The connection is released when the pool is dropped or explicitly closed;
/// once closed every access fails with [`AppError::ConnectionLost`].
pub struct DbPool {
    conn: Option<Connection>,
}

impl DbPool {
    /// Open a database file (or `:memory:`) with default settings.
    pub fn new(path: &str) -> AppResult<Self> {
        Self::open(&DbSettings {
            name: path.to_string(),
            ..DbSettings::default()
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::new(IN_MEMORY)
    }

    pub fn open(settings: &DbSettings) -> AppResult<Self> {
        let conn = if settings.name == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(expand_tilde(&settings.name))?
        };
        conn.busy_timeout(Duration::from_millis(settings.busy_timeout_ms))?;

        debug!(
            host = %settings.host,
            database = %settings.name,
            user = %settings.user,
            "opened database connection"
        );

        Ok(Self { conn: Some(conn) })
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    /// Run `func` with the live connection.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        match self.conn.as_mut() {
            Some(conn) => func(conn),
            None => {
                warn!("database connection lost");
                Err(AppError::ConnectionLost)
            }
        }
    }

    /// Run `func` inside one transaction: committed on `Ok`, rolled back on `Err`.
    pub fn with_transaction<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            match func(&tx) {
                Ok(value) => {
                    tx.commit()?;
                    Ok(value)
                }
                Err(e) => {
                    if let Err(rb) = tx.rollback() {
                        warn!(error = %rb, "rollback failed");
                    }
                    Err(e)
                }
            }
        })
    }

    /// Release the connection. Closing twice is a no-op.
    pub fn close(&mut self) -> AppResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| AppError::Db(e))?;
            debug!("closed database connection");
        }
        Ok(())
    }
}
