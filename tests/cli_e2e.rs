//! End-to-end CLI tests for the nexus-backup binary.

#![allow(deprecated)]

mod support;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use support::{
    PASSWORD, TOKEN_A, USER, artifact_url, listing_body, mount_artifact, mount_artifact_status,
    mount_listing,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO: &str = "releases";

/// Command with an isolated config directory, so no user config leaks in.
fn isolated_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nexus-backup").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

fn write_config(home: &Path, contents: &str) {
    let dir = home.join("config").join("nexus-backup");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), contents).unwrap();
}

async fn two_page_repository(server: &MockServer) {
    let first = vec![artifact_url(server, REPO, "org/demo/lib/1.0/lib-1.0.jar")];
    let second = vec![artifact_url(server, REPO, "org/demo/lib/1.0/lib-1.0.pom")];
    mount_listing(server, REPO, None, listing_body(&first, Some(TOKEN_A))).await;
    mount_listing(server, REPO, Some(TOKEN_A), listing_body(&second, None)).await;
}

#[test]
fn test_binary_help_displays_usage() {
    let temp = TempDir::new().unwrap();
    isolated_command(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Back up every artifact"));
}

#[test]
fn test_binary_version_displays_version() {
    let temp = TempDir::new().unwrap();
    isolated_command(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nexus-backup"));
}

#[test]
fn test_binary_requires_repository() {
    let temp = TempDir::new().unwrap();
    isolated_command(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repository"));
}

#[test]
fn test_binary_missing_credentials_exits_one() {
    let temp = TempDir::new().unwrap();
    isolated_command(temp.path())
        .args(["-r", REPO, "-n", "http://127.0.0.1:9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing connection settings"));
}

#[test]
fn test_binary_rejects_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "n3drURL = \"http://nexus\"\n");
    isolated_command(temp.path())
        .args(["-r", REPO])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_backs_up_repository() {
    let server = MockServer::start().await;
    two_page_repository(&server).await;
    mount_artifact(&server, REPO, "org/demo/lib/1.0/lib-1.0.jar", b"jar", 1).await;
    mount_artifact(&server, REPO, "org/demo/lib/1.0/lib-1.0.pom", b"pom", 1).await;

    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    isolated_command(temp.path())
        .args(["-n", &server.uri(), "-u", USER, "-p", PASSWORD, "-r", REPO])
        .arg("-o")
        .arg(&out)
        .arg("--no-progress")
        .assert()
        .success()
        .stderr(predicate::str::contains("Backup summary"));

    let dir = out.join(REPO).join("org/demo/lib/1.0");
    assert_eq!(std::fs::read(dir.join("lib-1.0.jar")).unwrap(), b"jar");
    assert_eq!(std::fs::read(dir.join("lib-1.0.pom")).unwrap(), b"pom");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_uses_config_file_and_default_output_dir() {
    let server = MockServer::start().await;
    two_page_repository(&server).await;
    mount_artifact(&server, REPO, "org/demo/lib/1.0/lib-1.0.jar", b"jar", 1).await;
    mount_artifact(&server, REPO, "org/demo/lib/1.0/lib-1.0.pom", b"pom", 1).await;

    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        &format!(
            "url = \"{}\"\nuser = \"{USER}\"\npassword = \"{PASSWORD}\" # secret\n",
            server.uri()
        ),
    );
    isolated_command(temp.path())
        .args(["-r", REPO, "-q"])
        .assert()
        .success();

    let jar = temp
        .path()
        .join("download")
        .join(REPO)
        .join("org/demo/lib/1.0/lib-1.0.jar");
    assert!(jar.exists(), "expected {} to exist", jar.display());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_partial_backup_exits_two() {
    let server = MockServer::start().await;
    two_page_repository(&server).await;
    mount_artifact(&server, REPO, "org/demo/lib/1.0/lib-1.0.jar", b"jar", 1).await;
    mount_artifact_status(&server, REPO, "org/demo/lib/1.0/lib-1.0.pom", 404).await;

    let temp = TempDir::new().unwrap();
    isolated_command(temp.path())
        .args(["-n", &server.uri(), "-u", USER, "-p", PASSWORD, "-r", REPO])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lib-1.0.pom"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_fail_fast_exits_one() {
    let server = MockServer::start().await;
    two_page_repository(&server).await;
    mount_artifact_status(&server, REPO, "org/demo/lib/1.0/lib-1.0.jar", 500).await;
    mount_artifact(&server, REPO, "org/demo/lib/1.0/lib-1.0.pom", b"pom", 0).await;

    let temp = TempDir::new().unwrap();
    isolated_command(temp.path())
        .args(["-n", &server.uri(), "-u", USER, "-p", PASSWORD, "-r", REPO])
        .arg("--fail-fast")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_ping_failure_aborts_before_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/service/metrics/ping"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    isolated_command(temp.path())
        .args(["-n", &server.uri(), "-u", USER, "-p", PASSWORD, "-r", REPO])
        .arg("--ping")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("health check failed"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "only the ping request is sent");
}
