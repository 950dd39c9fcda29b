//! `EventStore`: the façade over the `events` table.
//!
//! One instance owns one connection (through [`DbPool`]). Writes run in their
//! own transaction and are committed immediately. All operations return
//! typed results; the `*_or_empty` readers are the only place where a
//! failure is turned into an empty table.

use crate::config::{Config, DbSettings};
use crate::core::ingest::{IngestLogic, PreparedRow, coerce_text};
use crate::db::initialize::init_db;
use crate::db::migrate::schema_version;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::mapping::{ColumnMapping, DASHBOARD_COLUMNS};
use crate::models::outcome::AddOutcome;
use crate::models::record::RawRecord;
use crate::models::table::EventTable;
use rusqlite::Connection;
use tracing::{debug, info, warn};

pub struct EventStore {
    pool: DbPool,
    mapping: ColumnMapping,
}

impl EventStore {
    /// Open a store on the configured database with the given mapping.
    pub fn open(settings: &DbSettings, mapping: ColumnMapping) -> AppResult<Self> {
        mapping.validate()?;
        let pool = DbPool::open(settings)?;
        Ok(Self { pool, mapping })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::open(&cfg.database, cfg.column_mapping()?)
    }

    /// Store on a private in-memory database, schema already created.
    pub fn in_memory(mapping: ColumnMapping) -> AppResult<Self> {
        mapping.validate()?;
        let mut store = Self {
            pool: DbPool::in_memory()?,
            mapping,
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Create the `events` table (or add missing mapped columns).
    pub fn init_schema(&mut self) -> AppResult<()> {
        let mapping = &self.mapping;
        self.pool.with_conn(|conn| init_db(conn, mapping))
    }

    pub fn close(&mut self) -> AppResult<()> {
        self.pool.close()
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Whether an event with this external id is stored. The id is compared
    /// in its stored form (truncated, quotes stripped).
    pub fn exists_by_external_id(&mut self, object_id: &str) -> AppResult<bool> {
        let column = &self.mapping.external_id;
        let stored = coerce_text(object_id);
        self.pool
            .with_conn(|conn| Ok(queries::count_by_external_id(conn, column, &stored)? > 0))
    }

    fn do_insert(conn: &Connection, row: &PreparedRow) -> AppResult<usize> {
        let n = queries::insert_row(conn, row)?;
        debug!(rows = n, "inserted event row");
        Ok(n)
    }

    /// Insert a record from the ingestion stream.
    ///
    /// A record whose external id is already stored is skipped and reported
    /// as [`AddOutcome::DuplicateSkipped`]. Any failure rolls the transaction
    /// back and is logged.
    pub fn add_event(&mut self, record: &RawRecord) -> AppResult<AddOutcome> {
        let mapping = &self.mapping;

        let result = self.pool.with_transaction(|tx| {
            let object_id = IngestLogic::external_id(record, mapping)?;
            if queries::count_by_external_id(tx, &mapping.external_id, &object_id)? > 0 {
                info!(object_id = %object_id, "object id already in db - not adding");
                return Ok(AddOutcome::DuplicateSkipped);
            }

            let row = IngestLogic::prepare(record, mapping)?;
            let n = Self::do_insert(tx, &row)?;
            info!(object_id = %object_id, "event added");
            Ok(AddOutcome::Inserted(n))
        });

        if let Err(e) = &result {
            warn!(error = %e, "add_event failed, transaction rolled back");
        }
        result
    }

    /// Rows with no prediction yet, full header.
    pub fn pending_events(&mut self) -> AppResult<EventTable> {
        let header = self.mapping.full_header();
        self.pool
            .with_conn(|conn| queries::load_pending(conn, header))
    }

    /// Like [`pending_events`](Self::pending_events) but degrades to an empty
    /// table when the query fails.
    pub fn pending_events_or_empty(&mut self) -> EventTable {
        self.pending_events().unwrap_or_else(|e| {
            warn!(error = %e, "pending events query failed, returning empty table");
            EventTable::empty(self.mapping.full_header())
        })
    }

    pub fn set_prediction(
        &mut self,
        event_id: i64,
        prediction: &str,
        probability: f64,
    ) -> AppResult<usize> {
        if !probability.is_finite() {
            return Err(AppError::Validation(format!(
                "prediction probability must be a finite number, got {probability}"
            )));
        }

        let result = self.pool.with_transaction(|tx| {
            queries::update_prediction(tx, event_id, prediction, probability)
        });
        match &result {
            Ok(n) => info!(event_id, rows = n, "prediction stored"),
            Err(e) => warn!(event_id, error = %e, "set_prediction failed"),
        }
        result
    }

    /// Dashboard projection, newest first; undisposed rows only unless
    /// `include_all`.
    pub fn event_list(&mut self, include_all: bool) -> AppResult<EventTable> {
        self.pool
            .with_conn(|conn| queries::load_event_list(conn, include_all))
    }

    /// Like [`event_list`](Self::event_list) but degrades to an empty table
    /// when the query fails.
    pub fn event_list_or_empty(&mut self, include_all: bool) -> EventTable {
        self.event_list(include_all).unwrap_or_else(|e| {
            warn!(error = %e, "event list query failed, returning empty table");
            EventTable::empty(DASHBOARD_COLUMNS.iter().map(|c| c.to_string()).collect())
        })
    }

    pub fn set_disposition(&mut self, event_id: i64, disposition: &str) -> AppResult<usize> {
        let result = self
            .pool
            .with_transaction(|tx| queries::update_disposition(tx, event_id, disposition));
        match &result {
            Ok(n) => info!(event_id, rows = n, "disposition stored"),
            Err(e) => warn!(event_id, error = %e, "set_disposition failed"),
        }
        result
    }

    pub fn count(&mut self) -> AppResult<i64> {
        self.pool.with_conn(|conn| queries::count_events(conn))
    }

    pub fn schema_version(&mut self) -> AppResult<i64> {
        self.pool.with_conn(|conn| schema_version(conn))
    }
}
