//! Integration tests for the `parkspot` CLI binary.
//!
//! Backend-bound commands run against a wiremock server; nothing touches
//! the user's real configuration.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `parkspot` binary with env isolation.
///
/// Clears all `PARKSPOT_*` env vars and points config directories at
/// `home` so tests never read or write the real configuration.
fn parkspot_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("parkspot");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("PARKSPOT_PROFILE")
        .env_remove("PARKSPOT_BASE_URL")
        .env_remove("PARKSPOT_USER")
        .env_remove("PARKSPOT_CAR")
        .env_remove("PARKSPOT_OUTPUT")
        .env_remove("PARKSPOT_INSECURE")
        .env_remove("PARKSPOT_TIMEOUT")
        .env_remove("PARKSPOT_PASSWORD");
    cmd
}

const TWO_PROFILES: &str = r#"
default_profile = "campus"

[profiles.campus]
base_url = "http://localhost:5000"
car_id = 3

[profiles.staging]
base_url = "http://localhost:5001"
"#;

/// Write `contents` where the binary looks for its config under `home`.
fn write_config(home: &Path, contents: &str) -> std::path::PathBuf {
    let dir = home.join("parkspot");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn lots_body() -> Value {
    json!([
        { "parkinglot_id": 1, "name": "Parking Lot 1", "current_capacity": 34, "maximum_capacity": 70 },
        { "parkinglot_id": 2, "name": "Parking Lot 2", "current_capacity": 32, "maximum_capacity": 40, "priority": true },
        { "parkinglot_id": 3, "name": "Parking Lot 3", "current_capacity": 3, "maximum_capacity": 100 },
    ])
}

async fn backend_with_lots() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parkinglots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lots_body()))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("occupancy")
            .and(predicate::str::contains("reservation"))
            .and(predicate::str::contains("view")),
    );
}

#[test]
fn zsh_completions() {
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn start_from_requires_watch() {
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["occupancy", "--start-from", "zero"])
        .assert()
        .code(2);
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn missing_config_points_at_init() {
    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path()).args(["lots", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("Configuration file not found"), "{text}");
    assert!(text.contains("parkspot config init"), "{text}");
}

#[test]
fn unknown_profile_is_reported() {
    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--profile", "nope", "lots", "list"])
        .output()
        .unwrap();
    assert!(combined_output(&output).contains("Profile 'nope' not found"));
}

#[test]
fn unknown_profile_lists_configured_profiles() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), TWO_PROFILES);
    let output = parkspot_cmd(home.path())
        .args(["--profile", "nope", "lots", "list"])
        .output()
        .unwrap();
    let text = combined_output(&output);
    assert!(text.contains("campus, staging"), "{text}");
}

#[test]
fn broken_config_is_reported_not_replaced() {
    let home = TempDir::new().unwrap();
    let broken = format!("{TWO_PROFILES}\n[profiles.staging.display]\nstep = 300\n");
    let path = write_config(home.path(), &broken);

    parkspot_cmd(home.path())
        .args(["--profile", "home", "config", "set", "base_url", "http://localhost:5000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);

    let output = parkspot_cmd(home.path()).args(["lots", "list"]).output().unwrap();
    let text = combined_output(&output);
    assert!(!text.contains("config init"), "{text}");
    assert!(text.contains("Configuration error"), "{text}");
}

#[test]
fn missing_user_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:9", "car", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No user ID given"));
}

#[test]
fn guard_view_needs_a_spot() {
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:9", "view", "/guard/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--spot"));
}

#[test]
fn cancel_without_terminal_requires_yes() {
    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:9", "--car", "1"])
        .args(["reservation", "cancel"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

// ── Lots & occupancy ────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn lots_list_as_json() {
    let server = backend_with_lots().await;
    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "-o", "json", "lots", "list"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let lots = stdout_json(&output);
    assert_eq!(lots.as_array().unwrap().len(), 3);
    assert_eq!(lots[2]["name"], "Parking Lot 3");
    assert_eq!(lots[2]["available"], 3);
    assert_eq!(lots[1]["priority"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn priority_filter_keeps_priority_lots() {
    let server = backend_with_lots().await;
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "-o", "plain"])
        .args(["lots", "list", "--priority"])
        .assert()
        .success()
        .stdout("Parking Lot 2\t32/40\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn occupancy_as_json() {
    let server = backend_with_lots().await;
    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "-o", "json", "occupancy"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let summary = stdout_json(&output);
    assert_eq!(summary["capacity"], 210);
    assert_eq!(summary["occupied"], 141);
    assert_eq!(summary["available"], 69);
    assert_eq!(summary["percentage"], 67);
}

#[tokio::test(flavor = "multi_thread")]
async fn occupancy_plain_is_the_percentage() {
    let server = backend_with_lots().await;
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "-o", "plain", "occupancy"])
        .assert()
        .success()
        .stdout("67\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn occupancy_table_shows_gauge() {
    let server = backend_with_lots().await;
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "--color", "never", "occupancy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("67%").and(predicate::str::contains("█")));
}

// ── Backend errors ──────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn taken_spot_exits_with_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reservation"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "spot already reserved" })),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "--car", "3"])
        .args(["reservation", "create", "5"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Parking spot unavailable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_car_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mycar/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "--user", "9", "car", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("car show"));
}

// ── Views ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn expired_reservation_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reservation/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "car_id": 1,
            "car_license": "AGE-6277",
            "parking_spot_number": 10,
            "parking_spot_id": 1,
            "area_name": "Test Area",
            "area_floor": 2,
            "parking_lot_name": "Test ParkingLot",
            "reservation_time": "2023-11-01 23:59:59",
            "expired_time": "2023-11-02 23:59:59",
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "--car", "1", "-o", "json"])
        .args(["view", "/reserved_expired/"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let page = stdout_json(&output);
    assert_eq!(page["view"], "reserved_expired");
    assert_eq!(page["expired"], true);
    assert_eq!(page["reservation"]["parking_spot_number"], 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_path_falls_back_to_main() {
    let server = backend_with_lots().await;
    let home = TempDir::new().unwrap();
    let output = parkspot_cmd(home.path())
        .args(["--base-url", &server.uri(), "-o", "json"])
        .args(["view", "/no/such/page/"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let page = stdout_json(&output);
    assert_eq!(page["view"], "main");
    assert_eq!(page["path"], "/");
    assert_eq!(page["summary"]["percentage"], 67);
    assert_eq!(page["lots"].as_array().unwrap().len(), 3);
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn config_set_creates_profile() {
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["config", "set", "base_url", "http://localhost:5000"])
        .assert()
        .success();
    parkspot_cmd(home.path())
        .args(["config", "set", "car_id", "3"])
        .assert()
        .success();

    parkspot_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("default *\n");

    let written = std::fs::read_to_string(home.path().join("parkspot/config.toml")).unwrap();
    assert!(written.contains("car_id = 3"), "{written}");
}

#[test]
fn config_set_rejects_zero_step() {
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["config", "set", "base_url", "http://localhost:5000"])
        .assert()
        .success();
    parkspot_cmd(home.path())
        .args(["config", "set", "display.step", "0"])
        .assert()
        .code(2);
}

#[test]
fn config_set_needs_a_profile_url_first() {
    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["config", "set", "car_id", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_supplies_the_car() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/reservation/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "cancelled" })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    parkspot_cmd(home.path())
        .args(["config", "set", "base_url", &server.uri()])
        .assert()
        .success();
    parkspot_cmd(home.path())
        .args(["config", "set", "car_id", "3"])
        .assert()
        .success();

    parkspot_cmd(home.path())
        .args(["-y", "reservation", "cancel"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cancelled"));
}
