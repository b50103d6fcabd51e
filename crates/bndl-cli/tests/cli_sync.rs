use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn bndl_cmd() -> Command {
    Command::cargo_bin("bndl").unwrap()
}

fn workspace(sha256: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let manifest = format!(
        r#"
[project]
name = "sync-test"

[[project.bundle]]
name = "com.acme.app"
version = "1.0.0"
imports = [{{ package = "org.slf4j" }}]

[[repository]]
id = "central"
cache = "bundles"

[[repository.bundle]]
name = "org.slf4j.api"
version = "1.7.36"
exports = [{{ package = "org.slf4j", version = "1.7.36" }}]
archive = "archives/slf4j.jar"
sha256 = "{sha256}"
"#
    );
    fs::write(tmp.path().join("Bndl.toml"), manifest).unwrap();
    fs::create_dir_all(tmp.path().join("archives")).unwrap();
    fs::write(tmp.path().join("archives/slf4j.jar"), b"hello").unwrap();
    tmp
}

// sha256("hello")
const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

#[test]
fn test_sync_copies_archive_into_cache() {
    let tmp = workspace(HELLO_SHA256);

    bndl_cmd()
        .current_dir(tmp.path())
        .args(["sync"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Synchronized"));

    let cached = tmp.path().join("bundles/org.slf4j.api-1.7.36.jar");
    assert_eq!(fs::read(cached).unwrap(), b"hello");

    bndl_cmd()
        .current_dir(tmp.path())
        .args(["sync"])
        .assert()
        .success()
        .stderr(predicate::str::contains("already available locally"));
}

#[test]
fn test_sync_reports_checksum_mismatch() {
    let tmp = workspace(&"0".repeat(64));

    bndl_cmd()
        .current_dir(tmp.path())
        .args(["sync"])
        .assert()
        .success()
        .stderr(predicate::str::contains("checksum mismatch"));

    assert!(!tmp.path().join("bundles/org.slf4j.api-1.7.36.jar").exists());
}

#[test]
fn test_sync_fails_when_resolution_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Bndl.toml"),
        r#"
[project]
name = "broken"

[[project.bundle]]
name = "com.acme.app"
version = "1.0.0"
imports = [{ package = "org.missing" }]
"#,
    )
    .unwrap();

    bndl_cmd()
        .current_dir(tmp.path())
        .args(["sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("org.missing"));
}
