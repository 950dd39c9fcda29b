use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use std::fs;

mod common;
use common::{TestEnv, sample_record};

fn write_records(env: &TestEnv, name: &str, ids: &[i64]) -> String {
    let records: Vec<_> = ids.iter().map(|id| sample_record(*id)).collect();
    let path = env.path(name);
    fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

fn pending_json(env: &TestEnv) -> Vec<Value> {
    let output = env
        .cmd()
        .args(["pending", "--format", "json"])
        .output()
        .expect("run pending");
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("pending prints JSON");
    parsed.as_array().cloned().unwrap_or_default()
}

#[test]
fn test_init_creates_events_table() {
    let env = TestEnv::new();

    env.cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Events table ready"))
        .stdout(contains("43 mapped columns"));

    // test mode never writes the config file
    assert!(!env.path("fraudstore.yaml").exists());

    env.cmd()
        .args(["db", "--info"])
        .assert()
        .success()
        .stdout(contains("schema version : 1"))
        .stdout(contains("events         : 0"))
        .stdout(contains("********"))
        .stdout(contains("password       : password").not());
}

#[test]
fn test_add_reports_inserted_and_skipped() {
    let env = TestEnv::new();
    env.init();

    let file = write_records(&env, "batch.json", &[1, 2, 2]);

    env.cmd()
        .args(["add", &file])
        .assert()
        .success()
        .stdout(contains("2 event(s) added"))
        .stdout(contains("1 record(s) already in db - skipped"));

    assert_eq!(pending_json(&env).len(), 2);
}

#[test]
fn test_add_accepts_json_lines_from_stdin() {
    let env = TestEnv::new();
    env.init();

    let lines: Vec<String> = [10, 11]
        .iter()
        .map(|id| serde_json::to_string(&sample_record(*id)).unwrap())
        .collect();

    env.cmd()
        .args(["add", "-"])
        .write_stdin(lines.join("\n"))
        .assert()
        .success()
        .stdout(contains("2 event(s) added"));
}

#[test]
fn test_add_fails_on_malformed_record() {
    let env = TestEnv::new();
    env.init();

    let mut bad = sample_record(5);
    bad.remove("venue_name");
    let path = env.path("bad.json");
    fs::write(&path, serde_json::to_string(&vec![sample_record(4), bad]).unwrap()).unwrap();

    env.cmd()
        .args(["add", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("record 2"))
        .stderr(contains("expected 43 fields, got 42"));

    // the valid record of the batch is kept
    assert_eq!(pending_json(&env).len(), 1);
}

#[test]
fn test_review_workflow() {
    let env = TestEnv::new();
    env.init();
    let file = write_records(&env, "events.json", &[100, 200, 300]);
    env.cmd().args(["add", &file]).assert().success();

    env.cmd()
        .args(["predict", "1", "fraud", "0.93"])
        .assert()
        .success()
        .stdout(contains("stored for event 1"));

    let pending = pending_json(&env);
    let ids: Vec<i64> = pending.iter().filter_map(|r| r["eventid"].as_i64()).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(pending[0]["event_created"], "2021-01-01T00:00:00Z");

    env.cmd()
        .args(["dispose", "2", "not_fraud"])
        .assert()
        .success();

    env.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Spring Gala 300"))
        .stdout(contains("Spring Gala 100"))
        .stdout(contains("Spring Gala 200").not());

    let out = env.path("dashboard.csv");
    env.cmd()
        .args(["list", "--all", "--format", "csv", "--out", out.to_str().unwrap()])
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("eventid,prediction,pred_prob,disposition,name,org_name,sale_duration2,num_payouts")
    );
    assert!(lines.next().unwrap().starts_with("3,,,,Spring Gala 300"));
    assert!(lines.next().unwrap().starts_with("2,,,not_fraud,Spring Gala 200"));
    assert!(lines.next().unwrap().starts_with("1,fraud,0.93,,Spring Gala 100"));
}

#[test]
fn test_unknown_event_ids_only_warn() {
    let env = TestEnv::new();
    env.init();

    env.cmd()
        .args(["predict", "99", "fraud", "0.5"])
        .assert()
        .success()
        .stdout(contains("No event with id 99"));

    env.cmd()
        .args(["dispose", "99", "fraud"])
        .assert()
        .success()
        .stdout(contains("No event with id 99"));
}

#[test]
fn test_existing_output_file_needs_force() {
    let env = TestEnv::new();
    env.init();

    let out = env.path("pending.json");
    fs::write(&out, "keep me").unwrap();

    // piped stdin cannot confirm, even with a "y"
    env.cmd()
        .args(["pending", "--format", "json", "--out", out.to_str().unwrap()])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(contains("use --force to replace it"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    env.cmd()
        .args(["pending", "--format", "json", "--out", out.to_str().unwrap(), "--force"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "[]");
}

#[test]
fn test_config_file_is_honoured() {
    let env = TestEnv::new();
    let config = env.path("custom.yaml");
    let db = env.path("custom.sqlite");
    fs::write(
        &config,
        format!(
            "database:\n  host: db.internal\n  name: {}\n  user: reviewer\n  password: s3cret\ndefault_format: json\n",
            db.display()
        ),
    )
    .unwrap();

    let mut init = common::fsx();
    init.args(["--config", config.to_str().unwrap(), "--test", "init"])
        .assert()
        .success();
    assert!(db.exists());

    let mut print = common::fsx();
    print
        .args(["--config", config.to_str().unwrap(), "config", "--print"])
        .assert()
        .success()
        .stdout(contains("db.internal"))
        .stdout(contains("s3cret").not());

    // default_format: json
    let mut pending = common::fsx();
    pending
        .args(["--config", config.to_str().unwrap(), "pending"])
        .assert()
        .success()
        .stdout(contains("[]"));
}

#[test]
fn test_commands_fail_before_init() {
    let env = TestEnv::new();

    env.cmd()
        .args(["pending"])
        .assert()
        .failure()
        .stderr(contains("no such table"));
}
