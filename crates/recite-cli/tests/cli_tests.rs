//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run `recite` inside `dir` with a config that keeps every file there.
fn recite(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("recite").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RECITE_DATA_FILE")
        .env_remove("RECITE_AUDIT_LOG")
        .env_remove("RECITE_EXPORT_DIR");
    cmd
}

fn read(dir: &TempDir, file: &str) -> String {
    std::fs::read_to_string(dir.path().join(file)).unwrap_or_default()
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    recite(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created recite.toml"));
    assert!(dir.path().join("recite.toml").exists());

    recite(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();

    recite(&dir)
        .args(["add", "Carlos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carlos added"));

    assert_eq!(read(&dir, "class_data.txt"), "Carlos,0\n");
    assert!(read(&dir, "audit_log.txt").contains("] Added student: Carlos"));

    recite(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Class list (1)"))
        .stdout(predicate::str::contains("Carlos"))
        .stdout(predicate::str::contains("100.0%"));
}

#[test]
fn duplicate_add_fails() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Carlos"]).assert().success();

    recite(&dir)
        .args(["add", "Carlos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(read(&dir, "class_data.txt"), "Carlos,0\n");
}

#[test]
fn list_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("class_data.txt"), "Alice,0\nBob,2\n").unwrap();

    let output = recite(&dir)
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["Alice"], 0);
    assert_eq!(parsed["Bob"], 2);
}

#[test]
fn list_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    recite(&dir)
        .args(["list", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn set_score_and_remove() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Alice"]).assert().success();

    recite(&dir)
        .args(["set-score", "Alice", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice: 0 -> 5"));

    recite(&dir)
        .args(["set-score", "Alice", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid score"));

    recite(&dir)
        .args(["remove", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("score was 5"));

    recite(&dir)
        .args(["remove", "Alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    assert_eq!(read(&dir, "class_data.txt"), "");
}

#[test]
fn import_reports_each_line() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Alice"]).assert().success();
    std::fs::write(
        dir.path().join("import.txt"),
        "Alice,9\nBob\n\nCara,3\nDan,lots\n",
    )
    .unwrap();

    recite(&dir)
        .args(["import", "import.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped (duplicate): Alice"))
        .stdout(predicate::str::contains("Imported: Bob (0)"))
        .stdout(predicate::str::contains("Imported: Cara (3)"))
        .stdout(predicate::str::contains("Skipped line 5"))
        .stdout(predicate::str::contains("Added 2 new students"));

    assert_eq!(read(&dir, "class_data.txt"), "Alice,0\nBob,0\nCara,3\n");
    assert!(read(&dir, "audit_log.txt").contains("Imported 2 students from import.txt"));
}

#[test]
fn import_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    recite(&dir)
        .args(["import", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn pick_and_grade_correct() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Dina"]).assert().success();

    recite(&dir)
        .args(["pick", "--rolls", "0", "--grade", "correct"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WINNER: DINA"))
        .stdout(predicate::str::contains("Score updated"));

    assert_eq!(read(&dir, "class_data.txt"), "Dina,1\n");
    let log = read(&dir, "audit_log.txt");
    assert!(log.contains("] Picked: Dina"));
    assert!(log.contains("] Graded Dina: Correct"));
}

#[test]
fn pick_reads_grade_from_stdin() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Dina"]).assert().success();

    recite(&dir)
        .args(["pick", "--rolls", "0"])
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No points awarded"));

    assert_eq!(read(&dir, "class_data.txt"), "Dina,0\n");
    assert!(read(&dir, "audit_log.txt").contains("] Graded Dina: Pass"));
}

#[test]
fn prompt_only_accepts_one_as_correct() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Dina"]).assert().success();

    for answer in ["y\n", "yes\n", "correct\n"] {
        recite(&dir)
            .args(["pick", "--rolls", "0"])
            .write_stdin(answer)
            .assert()
            .success()
            .stdout(predicate::str::contains("No points awarded"));
    }
    assert_eq!(read(&dir, "class_data.txt"), "Dina,0\n");

    recite(&dir)
        .args(["pick", "--rolls", "0"])
        .write_stdin("1\n")
        .assert()
        .success();
    assert_eq!(read(&dir, "class_data.txt"), "Dina,1\n");
}

#[test]
fn cosmetic_rolls_are_not_logged() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("recite.toml"), "roll_delay_ms = 0\n").unwrap();
    recite(&dir).args(["add", "Dina"]).assert().success();

    recite(&dir)
        .args(["pick", "--rolls", "5", "--grade", "pass"])
        .assert()
        .success();

    let picks = read(&dir, "audit_log.txt")
        .lines()
        .filter(|l| l.contains("Picked:"))
        .count();
    assert_eq!(picks, 1);
}

#[test]
fn pick_empty_roster_fails() {
    let dir = TempDir::new().unwrap();
    recite(&dir)
        .args(["pick", "--rolls", "0", "--grade", "pass"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn pick_rejects_unknown_grade() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Dina"]).assert().success();
    recite(&dir)
        .args(["pick", "--rolls", "0", "--grade", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown grade"));
    assert!(!read(&dir, "audit_log.txt").contains("Picked"));
}

#[test]
fn export_writes_dated_sheet() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Alice"]).assert().success();

    recite(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("ScoreSheet_"));

    let today = chrono::Local::now().format("%Y%m%d").to_string();
    let sheet = read(&dir, &format!("ScoreSheet_{today}.txt"));
    assert_eq!(sheet, "--- CLASS SCORES ---\nAlice: 0\n");
}

#[test]
fn clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Alice"]).assert().success();

    recite(&dir)
        .arg("clear")
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));
    assert_eq!(read(&dir, "class_data.txt"), "Alice,0\n");

    recite(&dir)
        .arg("clear")
        .write_stdin("YES\n")
        .assert()
        .success();
    assert_eq!(read(&dir, "class_data.txt"), "");
    assert!(read(&dir, "audit_log.txt").contains("Added student: Alice"));
}

#[test]
fn reset_wipes_audit_log() {
    let dir = TempDir::new().unwrap();
    recite(&dir).args(["add", "Alice"]).assert().success();

    recite(&dir).args(["reset", "--yes"]).assert().success();

    assert_eq!(read(&dir, "class_data.txt"), "");
    let log = read(&dir, "audit_log.txt");
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("Reset class"));
}

#[test]
fn explicit_config_paths_are_used() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("period3.toml"),
        "data_file = \"rosters/period3.txt\"\naudit_log = \"period3.log\"\n",
    )
    .unwrap();

    recite(&dir)
        .args(["--config", "period3.toml", "add", "Alice"])
        .assert()
        .success();

    assert_eq!(read(&dir, "rosters/period3.txt"), "Alice,0\n");
    assert!(read(&dir, "period3.log").contains("Added student: Alice"));
    assert!(!dir.path().join("class_data.txt").exists());
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    recite(&dir)
        .args(["--config", "missing.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
