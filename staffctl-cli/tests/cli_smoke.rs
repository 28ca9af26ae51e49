//! Smoke tests for the staffctl binary surface

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn staffctl() -> Command {
    let mut cmd = Command::cargo_bin("staffctl").unwrap();
    // Keep the developer's own settings out of the run
    for var in ["DATABASE_URL", "DB_USER", "DB_HOST", "DB_NAME", "DB_PASSWORD", "DB_PORT"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help() {
    staffctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--debug"));
}

#[test]
fn test_version() {
    staffctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("staffctl"));
}

#[test]
fn test_missing_sqlite_file_is_connection_failure() {
    let dir = tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("absent.db").display());

    staffctl()
        .current_dir(dir.path())
        .arg("--database-url")
        .arg(&url)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Connected to the database").not())
        .stderr(predicate::str::contains("Failed to connect to the database"));
}

#[test]
fn test_unsupported_scheme() {
    let dir = tempdir().unwrap();

    staffctl()
        .current_dir(dir.path())
        .env("DATABASE_URL", "mysql://localhost/company")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported database URL scheme 'mysql'"));
}

#[test]
fn test_invalid_port() {
    let dir = tempdir().unwrap();

    staffctl()
        .current_dir(dir.path())
        .env("DB_PORT", "not-a-port")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DB_PORT"));
}
