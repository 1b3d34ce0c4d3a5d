#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MISSING_CREDENTIAL: &str = "no TMDB API key or access token is configured";

/// Command with an isolated config dir and no credential in the environment.
fn isolated_cmd(dir: &tempfile::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.arg("--dir")
        .arg(dir.path())
        .env_remove("TMDB_API_KEY")
        .env_remove("TMDB_API_TOKEN")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1");
    cmd
}

fn write_config(dir: &tempfile::TempDir, server: &MockServer) {
    let content = format!(
        "[tmdb]\napi_key = \"test-key\"\nbase_url = \"{}/3\"\n",
        server.uri()
    );
    std::fs::write(dir.path().join("config.toml"), content).unwrap();
}

#[test]
fn test_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("top-rated"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_details_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.arg("details")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_popular_rejects_page_zero() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.args(["popular", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--page"));
}

#[test]
fn test_popular_without_credential_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .arg("popular")
        .assert()
        .failure()
        .stderr(predicate::str::contains(MISSING_CREDENTIAL));
}

#[test]
fn test_blank_search_without_credential_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .args(["search", "--query", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains(MISSING_CREDENTIAL));
}

#[test]
fn test_init_writes_config_and_refuses_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    isolated_cmd(&dir)
        .args(["init", "--api-key", "k"])
        .assert()
        .success();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("api_key = \"k\""));
    isolated_cmd(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[tokio::test]
async fn test_popular_prints_results_from_api() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("page", "2"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("../../../fixtures/tmdb/movie_popular_page2.json"),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, &server);
    let mut cmd = isolated_cmd(&dir);
    cmd.args(["popular", "--page", "2"]);

    // Act
    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Inside Out 2"));
}

#[tokio::test]
async fn test_details_not_found_reports_friendly_error() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/999999999"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            r#"{"success":false,"status_code":34,"status_message":"The resource you requested could not be found."}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, &server);
    let mut cmd = isolated_cmd(&dir);
    cmd.args(["details", "--id", "999999999"]);

    // Act
    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();

    // Assert
    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("Endpoint or movie not found"));
}
