//! End-to-end checks of the `multisub` binary.

use assert_cmd::Command;
use base64::{engine::general_purpose::STANDARD, Engine};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn multisub(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("multisub").unwrap();
    cmd.env_remove("MULTISUB_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--config")
        .arg(config);
    cmd
}

fn config_file() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

#[test]
fn help_lists_commands() {
    let (_dir, config) = config_file();
    multisub(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("aggregate"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("sets"));
}

#[test]
fn aggregate_without_sources_fails() {
    let (_dir, config) = config_file();
    multisub(&config)
        .arg("aggregate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No source URLs given"));
}

#[test]
fn aggregate_drops_non_http_sources() {
    let (_dir, config) = config_file();
    multisub(&config)
        .args(["aggregate", "ftp://files.example/sub"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn sets_crud_round_trip() {
    let (_dir, config) = config_file();

    multisub(&config)
        .args([
            "sets", "add", "home", "--title", "Home", "--url", "https://a.example/sub", "--url",
            "ftp://bad.example/sub",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created set home with 1 source(s)"))
        .stderr(predicate::str::contains("ftp://bad.example/sub"));

    let listed = multisub(&config)
        .args(["-o", "json", "sets", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let sets: serde_json::Value = serde_json::from_slice(&listed).unwrap();
    assert_eq!(sets[0]["id"], "home");
    assert_eq!(sets[0]["urls"], serde_json::json!(["https://a.example/sub"]));

    // Re-adding replaces the sources and keeps the title.
    multisub(&config)
        .args(["sets", "add", "home", "--url", "https://b.example/sub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated set home"));

    multisub(&config)
        .args(["sets", "remove", "home"])
        .assert()
        .success();

    multisub(&config)
        .args(["sets", "remove", "home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn link_uses_configured_base_url() {
    let (_dir, config) = config_file();
    std::fs::write(
        &config,
        r#"
public_base_url = "https://subs.example.com/"

[[sets]]
id = "abc"
title = "Demo"
urls = []
"#,
    )
    .unwrap();

    multisub(&config)
        .args(["link", "abc"])
        .assert()
        .success()
        .stdout("https://subs.example.com/sub/abc\n");

    multisub(&config)
        .args(["link", "abc", "--base-url", "http://203.0.113.10"])
        .assert()
        .success()
        .stdout("http://203.0.113.10/sub/abc\n");
}

#[test]
fn link_without_base_url_points_at_loopback() {
    let (_dir, config) = config_file();
    std::fs::write(&config, "[[sets]]\nid = \"abc\"\ntitle = \"Demo\"\n").unwrap();

    multisub(&config)
        .args(["link", "abc"])
        .assert()
        .success()
        .stdout("http://127.0.0.1:5000/sub/abc\n")
        .stderr(predicate::str::contains("public_base_url"));
}

#[test]
fn unknown_set_is_an_error() {
    let (_dir, config) = config_file();
    multisub(&config)
        .args(["aggregate", "--set", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn aggregate_set_against_live_sources() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sub1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STANDARD.encode("vmess://a\nvmess://b")))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/sub2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("vmess://b\nvmess://c"))
        .mount(&upstream)
        .await;

    let (_dir, config) = config_file();
    std::fs::write(
        &config,
        format!(
            "[[sets]]\nid = \"mixed\"\ntitle = \"Mixed\"\nurls = [\"{0}/sub1\", \"{0}/down\", \"{0}/sub2\"]\n",
            upstream.uri()
        ),
    )
    .unwrap();

    let output = multisub(&config)
        .args(["aggregate", "--set", "mixed"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let encoded = String::from_utf8(output.stdout).unwrap();
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).unwrap()).unwrap();
    assert_eq!(decoded, "vmess://a\nvmess://b\nvmess://c");

    multisub(&config)
        .args(["aggregate", "--set", "mixed", "--decode"])
        .assert()
        .success()
        .stdout("vmess://a\nvmess://b\nvmess://c\n");
}
