use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    config: PathBuf,
    ledger: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config");
        fs::create_dir_all(&config).unwrap();
        fs::write(
            config.join("config.json"),
            r#"{"key_derivation": {"m": 64, "t": 1, "p": 1}}"#,
        )
        .unwrap();
        let ledger = temp.path().join("budget.json");
        Self {
            _temp: temp,
            config,
            ledger,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("homebudget").unwrap();
        cmd.env("HOMEBUDGET_CONFIG_DIR", &self.config)
            .env_remove("HOMEBUDGET_PASSWORD")
            .env_remove("HOMEBUDGET_LOG");
        cmd
    }

    /// Command on the fixture's ledger without encryption
    fn plain(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--file").arg(&self.ledger).arg("--no-password");
        cmd
    }

    fn run_plain(&self, args: &[&str]) {
        self.plain().args(args).assert().success();
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_init_creates_empty_ledger() {
    let fx = Fixture::new();
    fx.plain()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created ledger"));

    let doc: serde_json::Value = serde_json::from_str(&read(&fx.ledger)).unwrap();
    assert_eq!(doc, serde_json::json!({}));

    fx.plain()
        .arg("years")
        .assert()
        .success()
        .stdout(predicate::str::contains("No years found"));
}

#[test]
fn test_month_report_orders_expenses_first() {
    let fx = Fixture::new();
    fx.run_plain(&["init"]);
    fx.run_plain(&["add-year", "2021"]);

    fx.plain()
        .args(["add-entry", "2021", "Salary", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID:    1"));
    fx.plain()
        .args(["add-entry", "2021", "Rent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Type:  expense"));
    fx.run_plain(&["reorder", "2021", "1=1", "2=1"]);

    fx.plain()
        .args(["set", "2021", "jan", "1", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary January 2021: 1000.00"));
    fx.run_plain(&["set", "2021", "jan", "2", "400"]);

    fx.plain()
        .args(["report", "month", "2021", "jan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2021"))
        .stdout(predicate::str::is_match("(?s)Rent.*Salary").unwrap())
        .stdout(predicate::str::contains("600.00"));

    let doc: serde_json::Value = serde_json::from_str(&read(&fx.ledger)).unwrap();
    assert_eq!(doc["2021"]["months"]["jan"]["1"], 1000);
    assert_eq!(doc["2021"]["entries"]["2"]["name"], "Rent");
}

#[test]
fn test_add_accumulates_and_delete_clears_postings() {
    let fx = Fixture::new();
    fx.run_plain(&["add-year", "2022"]);
    fx.run_plain(&["add-entry", "2022", "Food"]);
    fx.run_plain(&["add", "2022", "mar", "1", "12.50"]);

    fx.plain()
        .args(["add", "2022", "mar", "1", "-2.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food March 2022: 10.00"));

    fx.plain()
        .args(["report", "year", "2022"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("10.00"));

    fx.run_plain(&["delete-entry", "2022", "1"]);
    let doc: serde_json::Value = serde_json::from_str(&read(&fx.ledger)).unwrap();
    assert_eq!(doc["2022"]["entries"], serde_json::json!({}));
    assert_eq!(doc["2022"]["months"]["mar"], serde_json::json!({}));
}

#[test]
fn test_unknown_entry_fails() {
    let fx = Fixture::new();
    fx.run_plain(&["add-year", "2021"]);

    fx.plain()
        .args(["set", "2021", "jan", "7", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry not found: 7 in 2021"));
}

#[test]
fn test_missing_ledger_fails() {
    let fx = Fixture::new();
    fx.plain()
        .arg("years")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_encrypted_ledger() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("--file")
        .arg(&fx.ledger)
        .env("HOMEBUDGET_PASSWORD", "correct horse")
        .args(["add-year", "2021"])
        .assert()
        .success();

    let raw = read(&fx.ledger);
    assert!(raw.contains("\"ct\""));
    assert!(!raw.contains("months"));

    fx.cmd()
        .arg("--file")
        .arg(&fx.ledger)
        .args(["--password", "correct horse", "years"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2021"));

    fx.cmd()
        .arg("--file")
        .arg(&fx.ledger)
        .args(["--password", "wrong", "years"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn test_save_as_plain_copy_and_last_used_path() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("--file")
        .arg(&fx.ledger)
        .args(["--password", "pw", "add-year", "2023"])
        .assert()
        .success();

    let copy = fx.ledger.with_file_name("copy.json");
    fx.cmd()
        .arg("--file")
        .arg(&fx.ledger)
        .args(["--password", "pw", "save-as", "--plain"])
        .arg(&copy)
        .assert()
        .success();
    assert!(read(&copy).contains("2023"));

    // Without --file the last used ledger is the copy
    fx.cmd()
        .args(["--no-password", "years"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2023"));
}

#[test]
fn test_export_to_stdout() {
    let fx = Fixture::new();
    fx.run_plain(&["add-year", "2021"]);
    fx.run_plain(&["copy-entries", "2021", "2021"]);

    fx.plain()
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2021\""))
        .stdout(predicate::str::contains("\"dec\""));
}

#[test]
fn test_config_shows_settings() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["config", "--currency", "€"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol:  €"))
        .stdout(predicate::str::contains("m=64 KiB"));
}
