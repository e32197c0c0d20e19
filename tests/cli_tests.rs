use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "dreamspend";

fn command(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("DREAMSPEND_DATA_DIR", data_dir.path())
        .env("LC_ALL", "en_US.UTF-8")
        .env_remove("DREAMSPEND_LOG");
    cmd
}

#[test]
fn cli_today_starts_a_new_game() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .arg("today")
        .assert()
        .success()
        .stdout(contains("Day 1").and(contains("$5.00")));
    assert!(dir.path().join("snapshot.json").exists());
}

#[test]
fn cli_spend_saves_today() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["spend", "Lunch=3.00@Food", "Coffee=2"])
        .assert()
        .success()
        .stdout(contains("Saved day 1: Filled").and(contains("Perfect fill")));

    command(&dir)
        .args(["history"])
        .assert()
        .success()
        .stdout(contains("Filled"));
}

#[test]
fn cli_overspend_is_rejected() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["spend", "Gadget=6.00"])
        .assert()
        .failure()
        .stderr(contains("exceeds the allowed total"));
}

#[test]
fn cli_settings_round_trip() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["settings", "reminder", "09:30"])
        .assert()
        .success();
    command(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(contains("09:30 (on)"));
}

#[test]
fn cli_journal_records_events() {
    let dir = TempDir::new().unwrap();
    command(&dir).arg("today").assert().success();
    command(&dir)
        .args(["log"])
        .assert()
        .success()
        .stdout(contains("DAY_CREATED"));
}

#[test]
fn cli_restart_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    command(&dir).arg("restart").assert().failure();
    command(&dir)
        .args(["restart", "--yes"])
        .assert()
        .success()
        .stdout(contains("Game restarted"));
}

#[test]
fn cli_celebration_persists_until_dismissed() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .args(["settings", "max", "5.00"])
        .assert()
        .success();
    command(&dir)
        .args(["spend", "Lunch=5"])
        .assert()
        .success()
        .stdout(contains("You reached the maximum allowance"));

    command(&dir)
        .arg("today")
        .assert()
        .success()
        .stdout(contains("Maximum reached!"));
    command(&dir)
        .arg("dismiss")
        .assert()
        .success()
        .stdout(contains("Celebration dismissed."));

    command(&dir)
        .arg("today")
        .assert()
        .success()
        .stdout(contains("Maximum reached!").not());
    command(&dir)
        .arg("dismiss")
        .assert()
        .success()
        .stdout(contains("Nothing to dismiss."));
}

#[test]
fn cli_paused_game_asks_for_restart() {
    let dir = TempDir::new().unwrap();
    let snapshot = r#"{
        "settings": {"language": "en", "max_behavior": "celebrationAndStop"},
        "days": [{
            "id": "6f1c2a4e-8d3b-4c5a-9e7f-0a1b2c3d4e5f",
            "day_index": 1,
            "date": "2020-01-01",
            "currency": "USD",
            "daily_limit": 500,
            "status": "open"
        }],
        "pending_allowance": 1000,
        "pending_currency": "USD",
        "paused": true
    }"#;
    std::fs::write(dir.path().join("snapshot.json"), snapshot).unwrap();

    command(&dir)
        .arg("today")
        .assert()
        .success()
        .stdout(contains("The game is paused"));
    command(&dir)
        .args(["spend", "Lunch=1"])
        .assert()
        .failure()
        .stderr(contains("dreamspend restart"));

    command(&dir).args(["restart", "--yes"]).assert().success();
    command(&dir)
        .arg("today")
        .assert()
        .success()
        .stdout(contains("Day 1").and(contains("The game is paused").not()));
}

#[test]
fn cli_config_reports_saved_game() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Saved game:     no"));

    command(&dir).arg("today").assert().success();
    command(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Saved game:     yes"));
}
