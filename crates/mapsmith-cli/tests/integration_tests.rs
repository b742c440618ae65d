//! Integration tests for the mapsmith binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PROFILE_JSON: &str = r#"{
    "header": {
        "name": "character-information",
        "scope": "starwars",
        "version": { "major": 1, "minor": 0 }
    },
    "definitions": [
        {
            "kind": "UseCaseDefinition",
            "useCaseName": "RetrieveCharacterInformation",
            "title": "Retrieve Character Information",
            "result": {
                "kind": "ObjectDefinition",
                "fields": [
                    {
                        "fieldName": "height",
                        "type": { "kind": "PrimitiveTypeName", "name": "number" }
                    }
                ]
            },
            "examples": [
                {
                    "input": { "characterName": "Luke Skywalker" },
                    "result": { "height": 172 }
                }
            ]
        }
    ]
}"#;

const PROVIDER_JSON: &str = r#"{
    "name": "swapi",
    "services": [{ "id": "default", "baseUrl": "https://swapi.dev/api" }],
    "defaultService": "default"
}"#;

fn write_inputs(dir: &Path) {
    fs::write(dir.join("profile.json"), PROFILE_JSON).unwrap();
    fs::write(dir.join("provider.json"), PROVIDER_JSON).unwrap();
}

fn mapsmith() -> Command {
    Command::cargo_bin("mapsmith").unwrap()
}

#[test]
fn help_flag_shows_subcommands() {
    mapsmith()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_matches_cargo() {
    mapsmith()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_writes_every_kind() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());

    mapsmith()
        .current_dir(temp.path())
        .args([
            "generate",
            "profile.json",
            "--provider",
            "provider.json",
            "--out",
            "out",
        ])
        .assert()
        .success();

    let suma = temp
        .path()
        .join("out/starwars.character-information.swapi.suma");
    let test_ts = temp
        .path()
        .join("out/starwars.character-information.swapi.test.ts");
    assert!(suma.exists());
    assert!(test_ts.exists());

    let contents = fs::read_to_string(&suma).unwrap();
    assert!(contents.contains("profile = \"starwars/character-information@1.0\""));
    assert!(contents.contains("map RetrieveCharacterInformation"));
}

#[test]
fn generate_single_kind_produces_mock_map() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());

    mapsmith()
        .current_dir(temp.path())
        .args([
            "generate",
            "profile.json",
            "--provider",
            "provider.json",
            "--kind",
            "mock-map",
        ])
        .assert()
        .success();

    let suma = temp
        .path()
        .join("starwars.character-information.swapi.suma");
    let contents = fs::read_to_string(&suma).unwrap();
    assert!(contents.contains("provider = \"mock\""));
    assert!(contents.contains("map result { height = 172 }"));
}

#[test]
fn generate_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());

    mapsmith()
        .current_dir(temp.path())
        .args([
            "generate",
            "profile.json",
            "--provider",
            "provider.json",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(
        !temp
            .path()
            .join("starwars.character-information.swapi.suma")
            .exists()
    );
}

#[test]
fn generate_refuses_overwrite_without_force() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());
    fs::write(
        temp.path().join("starwars.character-information.swapi.suma"),
        "existing",
    )
    .unwrap();

    mapsmith()
        .current_dir(temp.path())
        .args([
            "generate",
            "profile.json",
            "--provider",
            "provider.json",
            "--kind",
            "map",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    // --force overwrites
    mapsmith()
        .current_dir(temp.path())
        .args([
            "generate",
            "profile.json",
            "--provider",
            "provider.json",
            "--kind",
            "map",
            "--force",
        ])
        .assert()
        .success();

    let contents =
        fs::read_to_string(temp.path().join("starwars.character-information.swapi.suma")).unwrap();
    assert!(contents.contains("map RetrieveCharacterInformation"));
}

#[test]
fn generate_with_custom_set_overrides_builtin() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());

    let set_dir = temp.path().join("sets/custom-map");
    fs::create_dir_all(&set_dir).unwrap();
    fs::write(set_dir.join("set.toml"), "[set]\nkind = \"map\"\n").unwrap();
    fs::write(set_dir.join("document.tpl"), "custom {{profile.id}}\n").unwrap();

    mapsmith()
        .current_dir(temp.path())
        .args([
            "generate",
            "profile.json",
            "--provider",
            "provider.json",
            "--kind",
            "map",
            "--sets",
            "sets",
        ])
        .assert()
        .success();

    let contents =
        fs::read_to_string(temp.path().join("starwars.character-information.swapi.suma")).unwrap();
    assert_eq!(contents, "custom starwars/character-information@1.0\n");
}

#[test]
fn quiet_generate_prints_nothing() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());

    mapsmith()
        .current_dir(temp.path())
        .args([
            "-q",
            "generate",
            "profile.json",
            "--provider",
            "provider.json",
            "--kind",
            "map",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn detect_classifies_extensions() {
    mapsmith()
        .args(["detect", "api.suma", "api.supr", "notes.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api.suma: map"))
        .stdout(predicate::str::contains("api.supr: profile"))
        .stdout(predicate::str::contains("notes.txt: unknown"));
}

#[test]
fn detect_json_output_is_parseable() {
    let assert = mapsmith()
        .args(["detect", "api.SUMA", "--output-format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed[0]["format"], "map");
}

#[test]
fn shell_completions_generate() {
    mapsmith()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mapsmith"));
}
