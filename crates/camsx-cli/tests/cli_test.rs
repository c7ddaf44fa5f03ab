use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn camsx() -> Command {
    Command::cargo_bin("camsx").unwrap()
}

#[test]
fn test_extract_missing_input() {
    camsx()
        .args(["extract", "/nonexistent/statement.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_rejects_non_pdf() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("statement.pdf");
    std::fs::write(&input, b"definitely not a pdf").unwrap();

    camsx()
        .current_dir(dir.path())
        .arg("extract")
        .arg(&input)
        .args(["-p", "ABCDE1234F"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The selected file is not a valid PDF."));
}

#[test]
fn test_batch_without_matches() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.pdf");

    camsx()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    camsx()
        .args(["--config", config.to_str().unwrap(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file"))
        .stdout(predicate::str::contains("camsx config init"));
}

#[test]
fn test_config_init_then_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_str().unwrap();

    camsx()
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    camsx()
        .args(["--config", config, "config", "set", "extraction.fund_name_timeout", "7"])
        .assert()
        .success();

    camsx()
        .args(["--config", config, "config", "get", "extraction.fund_name_timeout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7"));

    // offset beyond the start limit is rejected
    camsx()
        .args(["--config", config, "config", "set", "extraction.fund_name_offset", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fund name window"));
}

#[test]
fn test_config_set_keeps_string_settings_as_text() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_str().unwrap();

    camsx()
        .args(["--config", config, "config", "set", "output.file_prefix", "2024"])
        .assert()
        .success();

    camsx()
        .args(["--config", config, "config", "get", "output.file_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2024\""));
}
