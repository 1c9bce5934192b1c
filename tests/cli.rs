//! End-to-end tests for the `studykit` binary.
//!
//! Each test points `HOME` at a temporary directory so no real
//! configuration or credentials are read.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn studykit(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studykit").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("STUDYKIT_TOKEN")
        .env_remove("STUDYKIT_API_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_command_families() {
    let home = TempDir::new().unwrap();
    studykit(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("timer"))
        .stdout(predicate::str::contains("schedule"))
        .stdout(predicate::str::contains("budget"));
}

#[test]
fn test_completions_print_script() {
    let home = TempDir::new().unwrap();
    studykit(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_studykit"));
}

#[test]
fn test_commands_require_login() {
    let home = TempDir::new().unwrap();
    studykit(&home)
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_login_validates_before_sending() {
    let home = TempDir::new().unwrap();
    studykit(&home)
        .args(["--api-url", "http://127.0.0.1:9", "login", "-e", "not-an-email", "-p", "123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("Email must be a valid address"))
        .stderr(predicate::str::contains("at least 6 characters"));
}

#[test]
fn test_session_log_rejects_zero_minutes() {
    let home = TempDir::new().unwrap();
    studykit(&home)
        .args(["--token", "t", "session", "log", "-s", "Math", "-m", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1 minute"));
}

#[test]
fn test_exam_count_is_bounded() {
    let home = TempDir::new().unwrap();
    studykit(&home)
        .args(["--token", "t", "exam", "generate", "--count", "31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 30"));
}

#[test]
fn test_logout_removes_credentials() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".studykit");
    std::fs::create_dir_all(&dir).unwrap();
    let credentials = dir.join("credentials.yaml");
    std::fs::write(&credentials, "token: abc\n").unwrap();

    studykit(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!credentials.exists());

    studykit(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_invalid_timer_config_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".studykit");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.yaml"),
        "timer:\n  presets: [5, 10]\n  default_minutes: 25\n",
    )
    .unwrap();

    studykit(&home)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_list_tasks_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "tok-123"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/study-planner"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"data": [
                {"_id": "t1", "title": "Essay", "subject": "History",
                 "deadline": "2025-05-01", "completed": false},
                {"_id": "t2", "title": "Lab", "subject": "Chemistry",
                 "deadline": "2025-05-02", "completed": true}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let home = TempDir::new().unwrap();
    studykit(&home)
        .args(["--api-url", uri.as_str()])
        .args(["login", "-e", "ana@uni.edu", "-p", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as ana@uni.edu"));
    assert!(home.path().join(".studykit/credentials.yaml").exists());
    assert!(home.path().join(".studykit/config.yaml").exists());

    studykit(&home)
        .args(["--api-url", uri.as_str(), "-o", "json"])
        .args(["task", "list", "--filter", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pending\": 1"))
        .stdout(predicate::str::contains("\"title\": \"Essay\""))
        .stdout(predicate::str::contains("Lab").not());
}
