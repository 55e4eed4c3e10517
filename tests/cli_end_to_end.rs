#![deny(clippy::all, clippy::pedantic)]

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;

const POST_7: &str = r#"{"id":7,"title":"Release notes","content":"v1","created_at":"2024-03-01T12:00:00Z","updated_at":"2024-03-01T12:00:00Z"}"#;

fn postboard(server: &MockServer) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postboard"));
    cmd.env("POSTBOARD_API_BASE_URL", server.url("/api/"))
        .env_remove("POSTBOARD_CONFIG_FILE")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn list_prints_view_model_end_to_end() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/api/posts/");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_7}]"));
    });

    let assert = postboard(&server).arg("list").assert().success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"title\": \"Release notes\""));
    assert!(output.contains("\"is_loading\": false"));
    mock.assert();
}

#[test]
fn delete_with_yes_skips_confirmation() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts/");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_7}]"));
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/posts/7/");
        then.status(204);
    });

    postboard(&server)
        .args(["delete", "--id", "7", "--yes"])
        .assert()
        .success()
        .stdout(contains("\"kind\": \"deleted\""));
    delete.assert();
}

#[test]
fn rejected_create_reports_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/posts/");
        then.status(400).body("title too long");
    });

    postboard(&server)
        .args(["create", "--title", "t", "--content", "c"])
        .assert()
        .failure()
        .stdout(contains("API Error (400): title too long"));
}

#[test]
fn blank_title_fails_without_network() {
    let server = MockServer::start();

    postboard(&server)
        .args(["create", "--title", "   ", "--content", "c"])
        .assert()
        .failure()
        .stderr(contains("Validation"));
}

#[test]
fn unsupported_scheme_fails_fast() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postboard"));
    cmd.env("POSTBOARD_API_BASE_URL", "ftp://127.0.0.1/api/")
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("api.base_url"));
}
