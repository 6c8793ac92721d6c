use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_swagdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn petstore_args() -> Vec<String> {
    vec![
        "-m".to_string(),
        fixture_path("petstore.toml"),
        "-m".to_string(),
        fixture_path("models"),
        "-c".to_string(),
        fixture_path("swagdoc.toml"),
    ]
}

// -- stdout --

#[test]
fn prints_pretty_json_to_stdout() {
    let assert = cmd().args(petstore_args()).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(output.starts_with("{\n  \"swagger\": \"2.0\""));
    assert!(output.ends_with("}\n"));
    let doc: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["info"]["title"], "Swagger Petstore");
    assert_eq!(doc["paths"]["/pet"]["post"]["operationId"], "addPet");
}

#[test]
fn compact_format_is_single_line() {
    let assert = cmd()
        .args(petstore_args())
        .args(["-f", "json-compact"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output.trim_end().lines().count(), 1);
    assert!(output.contains("\"basePath\":\"/v2\""));
}

// -- file output --

#[test]
fn writes_output_file_creating_directories() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api").join("swagger.json");

    cmd()
        .args(petstore_args())
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        doc["definitions"]["Pet"]["properties"]["tags"]["xml"]["wrapped"],
        true
    );
    assert_eq!(doc["securityDefinitions"]["api_key"]["in"], "header");
}

#[test]
fn output_directory_gets_default_file_name() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(petstore_args())
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success();

    let doc: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("swagger.json")).unwrap())
            .unwrap();
    assert_eq!(doc["swagger"], "2.0");
}

#[test]
fn manifests_accept_globs() {
    let pattern = format!("{}/*.json", fixture_path("models"));
    cmd()
        .args(["-m", &fixture_path("petstore.toml"), "-m", &pattern])
        .args(["-c", &fixture_path("swagdoc.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"#/definitions/Category\""));
}

// -- overrides --

#[test]
fn controller_from_command_line() {
    let assert = cmd()
        .args(["-m", &fixture_path("ping.toml")])
        .args(["--controller", "app::controllers::PingController"])
        .args(["--host", "api.example.com", "--base-path", "/v1"])
        .assert()
        .success();
    let doc: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(doc["host"], "api.example.com");
    assert_eq!(doc["basePath"], "/v1");
    assert_eq!(doc["paths"]["/ping"]["get"]["responses"]["200"]["schema"]["type"], "string");
}

#[test]
fn controller_annotations_beat_command_line_defaults() {
    let assert = cmd()
        .args(petstore_args())
        .args(["--host", "api.example.com"])
        .assert()
        .success();
    let doc: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(doc["host"], "petstore.swagger.io");
}

#[test]
fn inline_config_file() {
    let mut config = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(config, "controller = \"app::controllers::PingController\"").unwrap();
    writeln!(config, "swagger_version = \"2.0\"").unwrap();

    cmd()
        .args(["-m", &fixture_path("ping.toml")])
        .args(["-c", config.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"/ping\""));
}

// -- failures --

#[test]
fn missing_definition_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("swagger.json");

    cmd()
        .args(["-m", &fixture_path("broken.toml")])
        .args(["--controller", "app::controllers::Broken"])
        .args(["--models-namespace", "app::models"])
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "the model definition for app::models::Order was not found",
        ))
        .stderr(predicate::str::contains("status 501"));

    assert!(!out.exists());
}

#[test]
fn unsupported_method_fails() {
    let mut config = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(config, "controller = \"app::controllers::PetController\"").unwrap();
    writeln!(config, "models_namespace = \"app::models\"").unwrap();
    writeln!(config, "supported_methods = [\"get\"]").unwrap();

    cmd()
        .args(["-m", &fixture_path("petstore.toml"), "-m", &fixture_path("models")])
        .args(["-c", config.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown HTTP method specified in"))
        .stderr(predicate::str::contains("status 501"));
}

#[test]
fn unknown_controller_fails() {
    cmd()
        .args(["-m", &fixture_path("ping.toml")])
        .args(["--controller", "app::controllers::Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("status 500"));
}

#[test]
fn missing_controller_setting_fails() {
    cmd()
        .args(["-m", &fixture_path("ping.toml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no controller given"));
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(petstore_args())
        .args(["-f", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn invalid_config_key_fails() {
    let mut config = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(config, "controler = \"typo\"").unwrap();

    cmd()
        .args(["-m", &fixture_path("ping.toml")])
        .args(["-c", config.path().to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn requires_manifest_argument() {
    cmd().assert().failure();
}
