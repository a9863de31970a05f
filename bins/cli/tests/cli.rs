use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const DATASET: &str = r#"{
  "source_file": "pilot.xlsx",
  "sheets": {
    "BS": [
      {"Balance_sheet": "ACME", "Unnamed: 1": "AssetsTotal", "Unnamed: 2": 1000000},
      {"Balance_sheet": "ACME", "Unnamed: 1": "LiabilitiesAndEquityTotal", "Unnamed: 2": 1050000}
    ],
    "EQ": [
      {"Equity": "ACME", "Unnamed: 1": "Dividends", "Unnamed: 2": 200000},
      {"Equity": "ACME", "Unnamed: 1": "EquityClosing", "Unnamed: 2": 50000}
    ]
  }
}"#;

const CONSTRAINTS: &str = r#"{"tolerance_defaults": {"absolute": 1000, "percentage": 0.001}}"#;

const RULES: &str = r#"{"rules": [
  {"signal_type": "FIN.BS.EQUATION_BREAK", "risk_level": "SEVERE", "escalation": "CFO", "rule_id": "FIN-001"}
]}"#;

struct Workspace {
    tmp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let workspace = Self { tmp };
        workspace.write("dataset.json", DATASET);
        workspace.write("constraints.json", CONSTRAINTS);
        workspace.write("rules.json", RULES);
        workspace
    }

    fn dir(&self) -> &Path {
        self.tmp.path()
    }

    fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) {
        fs::write(self.path(name), contents).expect("write fixture");
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("stafin");
        cmd.current_dir(self.dir())
            .env_remove("RUN_MODE")
            .env_remove("STAFIN__PATHS__DATASET")
            .env_remove("STAFIN__ENGINE__PARALLEL")
            .args([
                "--dataset",
                "dataset.json",
                "--constraints",
                "constraints.json",
                "--rules",
                "rules.json",
                "--out-json",
                "out/report.json",
                "--out-md",
                "out/report.md",
            ]);
        cmd
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read report")).expect("parse report")
}

#[test]
fn run_writes_both_reports() {
    let ws = Workspace::new();
    ws.cmd()
        .assert()
        .success()
        .stdout(contains("out/report.json"))
        .stdout(contains("out/report.md"));

    let report = read_json(&ws.path("out/report.json"));
    assert_eq!(report["report_id"], "sta.financial.run_report.v0_1");
    assert_eq!(report["input_dataset"], "pilot.xlsx");
    assert_eq!(report["signals_count"], 2);
    assert_eq!(report["signals"][0]["type"], "FIN.BS.EQUATION_BREAK");
    assert_eq!(report["signals"][0]["risk_level"], "SEVERE");
    assert_eq!(report["signals"][1]["type"], "FIN.DIV.LEGALITY_IMPOSSIBLE");
    assert_eq!(report["signals"][1]["rule_id"], "UNSPECIFIED");

    let markdown = fs::read_to_string(ws.path("out/report.md")).expect("read markdown");
    assert!(markdown.starts_with("# STA Financial Run Report v0.1\n"));
    assert!(markdown.contains("### 1. FIN.BS.EQUATION_BREAK — SEVERE — CFO"));
}

#[test]
fn json_summary() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--json", "--parallel"]).output().expect("run stafin");
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).expect("parse summary");
    assert_eq!(summary["report_json"], "out/report.json");
    assert_eq!(summary["report_md"], "out/report.md");
    assert_eq!(summary["signals_count"], 2);
}

#[test]
fn clean_dataset_reports_no_signals() {
    let ws = Workspace::new();
    ws.write("dataset.json", r#"{"sheets": {}}"#);
    ws.cmd().assert().success();

    let report = read_json(&ws.path("out/report.json"));
    assert_eq!(report["signals_count"], 0);
    assert_eq!(report["input_dataset"], "STA_Pilot_Financials_v0_1.json");
    let markdown = fs::read_to_string(ws.path("out/report.md")).expect("read markdown");
    assert!(markdown.ends_with("No signals triggered."));
}

#[test]
fn missing_dataset_is_io_error() {
    let ws = Workspace::new();
    fs::remove_file(ws.path("dataset.json")).expect("remove dataset");
    ws.cmd().assert().code(74).stderr(contains("dataset.json"));
    assert!(!ws.path("out/report.json").exists());
}

#[test]
fn malformed_rules_is_parse_error() {
    let ws = Workspace::new();
    ws.write("rules.json", "{ not json");
    ws.cmd().assert().code(65).stderr(contains("rule pack"));
}

#[test]
fn numeric_rule_metadata_is_reported_as_text() {
    let ws = Workspace::new();
    ws.write(
        "rules.json",
        r#"{"rules": [{"signal_type": "FIN.BS.EQUATION_BREAK", "rule_id": 101, "risk_level": "HIGH"}]}"#,
    );
    ws.cmd().assert().success();

    let report = read_json(&ws.path("out/report.json"));
    assert_eq!(report["signals"][0]["rule_id"], "101");
    assert_eq!(report["signals"][0]["risk_level"], "HIGH");
}

#[test]
fn negative_tolerance_is_validation_error() {
    let ws = Workspace::new();
    ws.write("constraints.json", r#"{"tolerance_defaults": {"percentage": -0.5}}"#);
    ws.cmd().assert().code(65).stderr(contains("percentage"));
    assert!(!ws.path("out/report.md").exists());
}

#[test]
fn dataset_path_from_environment() {
    let ws = Workspace::new();
    ws.write("other.json", r#"{"source_file": "from-env.json"}"#);
    let mut cmd = cargo_bin_cmd!("stafin");
    cmd.current_dir(ws.dir())
        .env("STAFIN__PATHS__DATASET", "other.json")
        .args([
            "--constraints",
            "constraints.json",
            "--rules",
            "rules.json",
            "--out-json",
            "report.json",
            "--out-md",
            "report.md",
        ])
        .assert()
        .success();

    let report = read_json(&ws.path("report.json"));
    assert_eq!(report["input_dataset"], "from-env.json");
}
