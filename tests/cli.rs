use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DEMO_SCRIPT: &str = r"/*
📜 ✨ DemoApp ✨

[rewrite_local]
^https?:\/\/api\.demo\.com\/v1\/user url script-response-body https://raw.example.com/demo.js

[mitm]
hostname = api.demo.com
*/
";

const NO_HOSTNAME_SCRIPT: &str = r"[rewrite_local]
^https://nohost\.example\.com url script-response-body https://raw.example.com/nohost.js
";

fn qxconvert() -> Command {
    let mut cmd = Command::cargo_bin("qxconvert").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn workspace_with(scripts: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let qx_dir = temp_dir.path().join("qx");
    fs::create_dir(&qx_dir).unwrap();
    for (name, content) in scripts {
        fs::write(qx_dir.join(name), content).unwrap();
    }
    temp_dir
}

#[test]
fn converts_with_default_directories() {
    let workspace = workspace_with(&[("demo.js", DEMO_SCRIPT)]);

    qxconvert()
        .current_dir(workspace.path())
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("processed 1 scripts (1 converted"));

    let plugin = fs::read_to_string(workspace.path().join("loon/demo.plugin")).unwrap();
    assert!(plugin.starts_with("#!name = DemoApp 🔐APP\n"));
    assert!(plugin.contains(
        r"http-response ^https?:\/\/api\.demo\.com\/v1\/user script-path=https://raw.example.com/demo.js"
    ));

    let module = fs::read_to_string(workspace.path().join("surge/demo.sgmodule")).unwrap();
    assert!(module.contains("hostname = %APPEND% api.demo.com\n"));
    assert!(module.contains("#!category=🔐APP\n"));
}

#[test]
fn positional_directories_are_created() {
    let workspace = workspace_with(&[("demo.js", DEMO_SCRIPT)]);
    let loon_dir = workspace.path().join("out/nested/loon");
    let surge_dir = workspace.path().join("out/nested/surge");

    qxconvert()
        .arg(workspace.path().join("qx"))
        .arg(&loon_dir)
        .arg(&surge_dir)
        .arg("--quiet")
        .assert()
        .success();

    assert!(loon_dir.join("demo.plugin").exists());
    assert!(surge_dir.join("demo.sgmodule").exists());
}

#[test]
fn skips_script_without_hostname() {
    let workspace = workspace_with(&[("demo.js", DEMO_SCRIPT), ("nohost.js", NO_HOSTNAME_SCRIPT)]);

    qxconvert()
        .current_dir(workspace.path())
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING:").and(predicate::str::contains("hostname")))
        .stdout(predicate::str::contains("processed 2 scripts (1 converted, 1 skipped"));

    assert!(!workspace.path().join("loon/nohost.plugin").exists());
    assert!(!workspace.path().join("surge/nohost.sgmodule").exists());
}

#[test]
fn missing_input_directory_fails() {
    let workspace = TempDir::new().unwrap();

    qxconvert()
        .current_dir(workspace.path())
        .arg("does-not-exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn dry_run_writes_nothing() {
    let workspace = workspace_with(&[("demo.js", DEMO_SCRIPT)]);

    qxconvert()
        .current_dir(workspace.path())
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"));

    assert!(!workspace.path().join("loon").exists());
    assert!(!workspace.path().join("surge").exists());
}

#[test]
fn json_report_lists_files() {
    let workspace = workspace_with(&[("demo.js", DEMO_SCRIPT)]);

    let output = qxconvert()
        .current_dir(workspace.path())
        .args(["--output-format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let report_line = stdout
        .lines()
        .find(|line| line.contains("\"type\":\"report\""))
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(report_line).unwrap();

    assert_eq!(report["files_processed"], 1);
    assert_eq!(report["converted"], 1);
    assert_eq!(report["files"][0]["status"], "converted");
    assert_eq!(report["files"][0]["app_name"], "DemoApp");
    assert_eq!(report["files"][0]["pattern_syntax"], "rewrite_local");
}

#[test]
fn config_file_overrides_metadata() {
    let workspace = workspace_with(&[("demo.js", DEMO_SCRIPT)]);
    fs::write(
        workspace.path().join("qxconvert.toml"),
        "[metadata]\nauthor = \"tester\"\nicon_base_url = \"https://icons.test/\"\n",
    )
    .unwrap();

    qxconvert()
        .current_dir(workspace.path())
        .arg("--quiet")
        .assert()
        .success();

    let plugin = fs::read_to_string(workspace.path().join("loon/demo.plugin")).unwrap();
    assert!(plugin.contains("#!author = tester\n"));
    assert!(plugin.contains("#!icon = https://icons.test/demoapp.png\n"));
}

#[test]
fn invalid_config_file_fails() {
    let workspace = workspace_with(&[("demo.js", DEMO_SCRIPT)]);
    let config_path = workspace.path().join("broken.toml");
    fs::write(&config_path, "[metadata\nauthor = ").unwrap();

    qxconvert()
        .current_dir(workspace.path())
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
