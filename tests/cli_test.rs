//! Tests for the `use-client-scan` binary.
mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::*;

fn scan_cmd(ws: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("use-client-scan").unwrap();
    cmd.arg("--root").arg(ws.path());
    cmd
}

#[test]
fn test_cli_lists_flagged_files() {
    let ws = TestWorkspace::new(&common::next_app_fixture());

    let output = scan_cmd(&ws).assert().code(1).get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("Missing \"use client\" directives:"));
    let listed: Vec<String> = lines.map(|l| l.trim().to_string()).collect();
    let expected: Vec<String> = common::next_app_flagged()
        .iter()
        .map(|p| ws.apath(p).display().to_string())
        .collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_cli_clean_project() {
    let ws = TestWorkspace::new(
        r#"
//- /app/page.tsx
'use client';
import { useState } from 'react';
export default function Page() { const [a] = useState(0); return a; }
"#,
    );

    scan_cmd(&ws)
        .assert()
        .success()
        .stdout("All components are correctly configured.\n");
}

#[test]
fn test_cli_json_output() {
    let ws = TestWorkspace::new(
        r#"
//- /components/Button.tsx
export const Button = () => <button onClick={go}>Go</button>;
"#,
    );

    let output = scan_cmd(&ws)
        .args(["--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(report["scanned"], 1);
    assert_eq!(
        report["flagged"][0]["path"],
        ws.apath("components/Button.tsx").display().to_string()
    );
    assert_eq!(report["flagged"][0]["signals"][0]["token"], "onClick");
}

#[test]
fn test_cli_verbose_signals() {
    let ws = TestWorkspace::new(
        r#"
//- /lib/id.ts
export const id = () => Math.random();
"#,
    );

    scan_cmd(&ws)
        .arg("--verbose-signals")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("dynamic-call:Math.random()"));
}

#[test]
fn test_cli_exclude_flag() {
    let ws = TestWorkspace::new(
        r#"
//- /generated/widget.tsx
useState(0);
"#,
    );

    scan_cmd(&ws)
        .args(["--exclude", "generated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("correctly configured"));
}

#[test]
fn test_cli_reads_project_config() {
    let ws = TestWorkspace::new(
        r#"
//- /.use-client-scan.json
{ "exclude": ["legacy"], "extensions": ["tsx"] }
//- /legacy/old.tsx
useState(0);
//- /lib/util.ts
window.alert(1);
"#,
    );

    scan_cmd(&ws)
        .assert()
        .success()
        .stdout("All components are correctly configured.\n");
}

#[test]
fn test_cli_rejects_bad_config() {
    let ws = TestWorkspace::new(
        r#"
//- /.use-client-scan.json
{ "unknown": true }
"#,
    );

    scan_cmd(&ws)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn test_cli_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    Command::cargo_bin("use-client-scan")
        .unwrap()
        .arg("--root")
        .arg(&missing)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("project root not found"));
}

#[test]
fn test_cli_init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("use-client-scan")
        .unwrap()
        .args(["init", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".use-client-scan.json"));
    assert!(dir.path().join(".use-client-scan.json").is_file());

    Command::cargo_bin("use-client-scan")
        .unwrap()
        .args(["init", "--root"])
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}
