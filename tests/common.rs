#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use fraudstore::{ColumnMapping, RawRecord};
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn fsx() -> Command {
    cargo_bin_cmd!("fraudstore")
}

/// Scratch directory holding a test database and a (never written) config file.
pub struct TestEnv {
    pub dir: TempDir,
    pub db: String,
    pub config: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir.path().join("events.sqlite").to_string_lossy().to_string();
        let config = dir.path().join("fraudstore.yaml").to_string_lossy().to_string();
        Self { dir, db, config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Command with `--db` and `--config` pointing into the scratch directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = fsx();
        cmd.args(["--db", &self.db, "--config", &self.config]);
        cmd
    }

    pub fn init(&self) {
        self.cmd().args(["--test", "init"]).assert().success();
    }
}

/// Value a well-formed stream record carries for `column`.
fn sample_value(column: &str, object_id: i64) -> Value {
    match column {
        "approx_payout_date" => json!(1612137600),
        "event_created" => json!(1609459200),
        "event_end" => json!(1611964800),
        "event_published" => json!(1609545600.75),
        "event_start" => json!(1611878400),
        "user_created" => json!(1577836800),
        "object_id" => json!(object_id),
        "name" => json!(format!("Spring Gala {object_id}")),
        "org_name" => json!("Acme Events"),
        "listed" => json!("y"),
        "num_payouts" => json!(3),
        "sale_duration2" => json!(30),
        "venue_latitude" => json!(40.7128),
        "venue_longitude" => json!(-74.006),
        "ticket_types" => json!([{"cost": 25.0, "quantity_total": 100}]),
        "previous_payouts" => json!([]),
        "has_logo" | "has_analytics" | "fb_published" | "show_map" => json!(1),
        "body_length" | "name_length" | "user_age" | "num_order" => json!(12),
        "gts" | "sale_duration" => json!(120.5),
        _ => json!(format!("{column}-value")),
    }
}

/// A 43-field record in mapping order.
pub fn sample_record(object_id: i64) -> RawRecord {
    ColumnMapping::default()
        .columns
        .iter()
        .fold(RawRecord::new(), |rec, col| {
            rec.with(col, sample_value(col, object_id))
        })
}
