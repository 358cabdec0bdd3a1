mod common;

use common::LogBuilder;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    logs: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let logs = dir.path().join("logs");
        fs::create_dir(&logs).unwrap();

        fs::write(
            logs.join("w5abc.log"),
            LogBuilder::new("W5ABC")
                .station("FIXED")
                .overlay("WIRES")
                .qso(14250, "CW", "1500", "ORLE", "K5XYZ", "TX")
                .qso(14050, "CW", "1501", "ORLE", "W5MS", "MS")
                .qso(7030, "CW", "1502", "ORLE", "K5XYZ", "TX")
                .qso(14250, "PH", "1503", "ORLE", "K5XYZ", "TX")
                .build(),
        )
        .unwrap();
        fs::write(
            logs.join("k5xyz.CBR"),
            LogBuilder::new("K5XYZ")
                .station("FIXED")
                .overlay("WIRES")
                .qso(14250, "PH", "1500", "TX", "W5ABC", "ORLE")
                .build(),
        )
        .unwrap();
        // not a log extension, never read
        fs::write(logs.join("notes.md"), "QSO: junk").unwrap();

        Self { dir, logs }
    }

    fn add_bad_log(&self) {
        fs::write(
            self.logs.join("bad.txt"),
            LogBuilder::new("W5BAD")
                .qso(14250, "AM", "1500", "ORLE", "K5XYZ", "TX")
                .build(),
        )
        .unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        let data = common::data_dir();
        let output = Command::new(env!("CARGO_BIN_EXE_qsoparty"))
            .args(args)
            .arg("--local")
            .arg(data.join("local_codes.txt"))
            .arg("--regional")
            .arg(data.join("regional_codes.txt"))
            .output()
            .expect("Failed to run qsoparty");

        if !output.status.success() {
            println!("STDERR:\n{}", String::from_utf8_lossy(&output.stderr));
        }
        output
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_validate_command() {
    let ctx = TestContext::new();
    let reports = ctx.path("reports");
    let output = ctx.run(&[
        "validate",
        path_str(&ctx.logs),
        "--report-dir",
        path_str(&reports),
    ]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Validation Report for W5ABC"));
    assert!(out.contains("Validation Report for K5XYZ"));
    assert!(!out.contains("junk"));
    assert_eq!(out.matches("Overall Status: VALID").count(), 2);
    assert!(out.contains("Valid logs: 2 / 2"));

    let written = fs::read_to_string(reports.join("w5abc-validation.txt")).unwrap();
    assert!(written.contains("Total QSOs: 4"));
}

#[test]
fn test_validate_reports_bad_log() {
    let ctx = TestContext::new();
    ctx.add_bad_log();
    let output = ctx.run(&["validate", path_str(&ctx.logs)]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Overall Status: INVALID"));
    assert!(out.contains("Invalid mode: AM"));
    assert!(out.contains("Valid logs: 2 / 3"));
}

#[test]
fn test_score_command() {
    let ctx = TestContext::new();
    ctx.add_bad_log();
    let json = ctx.path("results.json");
    let prepared = ctx.path("prepared");
    let output = ctx.run(&[
        "score",
        path_str(&ctx.logs),
        "--json",
        path_str(&json),
        "--prepared-dir",
        path_str(&prepared),
    ]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("=== OVERALL STANDINGS ==="));
    assert!(out.contains("=== STATISTICS ==="));
    assert!(out.contains("Local Fixed - Mixed - Low Power (lf_mx_lo)"));
    assert!(out.contains("Non-Local - Phone Only - Overlay (nl_ph_ol)"));

    let winner = Regex::new(r"\|\s*1\s*\|\s*W5ABC\s*\|\s*56\s*\|").unwrap();
    assert!(winner.is_match(&out), "STDOUT:\n{}", out);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(report["outcomes"].as_array().unwrap().len(), 3);
    assert_eq!(report["results"]["overall"][0]["log_id"], "w5abc");
    assert_eq!(report["results"]["overall"][0]["final_score"], 56);
    assert_eq!(report["results"]["overall"][1]["final_score"], 2);

    let text = fs::read_to_string(prepared.join("w5abc.prepared.log")).unwrap();
    assert!(text.starts_with("START-OF-LOG: 3.0\nQSOPARTY-CATEGORY: 2,2,1,1\n"));
    assert!(!prepared.join("bad.prepared.log").exists());
}

#[test]
fn test_rules_file_and_flags() {
    let ctx = TestContext::new();
    let rules = ctx.path("rules.json");
    fs::write(&rules, r#"{"scoring": {"phone_points": 10, "cw_digital_points": 20}}"#).unwrap();
    let json = ctx.path("results.json");

    let output = ctx.run(&[
        "score",
        path_str(&ctx.logs),
        "--rules",
        path_str(&rules),
        "--cw-digital-points",
        "5",
        "--json",
        path_str(&json),
    ]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    // W5ABC: 3 CW at 5 (flag) + 1 phone at 10 (file), 4 multipliers
    assert_eq!(report["results"]["overall"][0]["final_score"], (15 + 10) * 4);
}

#[test]
fn test_missing_reference_file_fails() {
    let ctx = TestContext::new();
    let output = Command::new(env!("CARGO_BIN_EXE_qsoparty"))
        .args(["validate", path_str(&ctx.logs)])
        .arg("--local")
        .arg(ctx.path("missing.txt"))
        .output()
        .unwrap();

    assert!(!output.status.success());
}
