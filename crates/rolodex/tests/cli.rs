//! CLI behavior tests for the rolodex binary.
//!
//! These verify:
//! - startup fails fast without a Dex API key
//! - `call` exit codes track tool success and failure
//! - `serve` speaks newline-delimited JSON-RPC on stdio

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn missing_api_key_is_fatal() {
    Command::cargo_bin("rolodex")
        .unwrap()
        .env_remove("DEX_API_KEY")
        .args(["call", "get_contacts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DEX_API_KEY"));
}

#[test]
fn bad_json_arguments_exit_nonzero() {
    Command::cargo_bin("rolodex")
        .unwrap()
        .env("DEX_API_KEY", "test-key")
        .args(["call", "get_contacts", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse arguments as JSON"));
}

#[test]
fn local_validation_failures_print_the_hint_and_exit_nonzero() {
    Command::cargo_bin("rolodex")
        .unwrap()
        .env("DEX_API_KEY", "test-key")
        .args(["call", "delete_contact", r#"{"id":"12345"}"#])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid UUID format for contact ID"))
        .stdout(predicate::str::contains("find_contacts_by_partial_id"))
        .stderr(predicate::str::contains("returned an error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn call_prints_the_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "contacts": [
                { "id": "4e87699a-71f4-4dad-9c11-9623c21eb017", "full_name": "Ada Lovelace" }
            ]}
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("rolodex")
            .unwrap()
            .env("DEX_API_KEY", "test-key")
            .env("DEX_GRAPHQL_URL", &uri)
            .args(["call", "get_contacts", "{}"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Ada Lovelace"));
    })
    .await
    .unwrap();
}

#[test]
fn serve_speaks_json_rpc_on_stdio() {
    let output = Command::cargo_bin("rolodex")
        .unwrap()
        .env("DEX_API_KEY", "test-key")
        .arg("serve")
        .write_stdin(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        ))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // One response per request; the notification gets none.
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("\"protocolVersion\":\"2024-11-05\""));
    assert!(stdout.contains("find_contacts_by_partial_id"));
    assert!(stdout.contains("\"inputSchema\""));
}

#[test]
fn serve_rejects_garbage_lines_without_dying() {
    let output = Command::cargo_bin("rolodex")
        .unwrap()
        .env("DEX_API_KEY", "test-key")
        .arg("serve")
        .write_stdin(concat!(
            "this is not json\n",
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
        ))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("-32700"));
    assert!(stdout.lines().nth(1).unwrap().contains("\"result\":{}"));
}
