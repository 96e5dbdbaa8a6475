//! Referential closure of the written dataset, and verifier detection of
//! corrupted foreign keys.

use fraudgen_core::{
    engine::{GenEngine, RunOptions},
    spec::DatasetSpec,
    verify,
};
use std::fs;
use std::path::PathBuf;

const EDGES: &[&str] = &[
    "account.customer_id",
    "login_event.customer_id",
    "login_event.device_id",
    "txn.account_id",
    "txn.customer_id",
    "txn.merchant_id",
    "txn.device_id",
    "case_link.txn_id",
];

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fraudgen-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn clean_run_reports_zero_missing_for_every_edge() {
    let dir = scratch_dir("ref-clean");
    let report = GenEngine::new(DatasetSpec::default_test(), RunOptions::seeded(11))
        .run(&dir)
        .expect("pipeline run");

    assert_eq!(report.integrity.len(), EDGES.len());
    for edge in EDGES {
        let findings = report
            .integrity
            .get(*edge)
            .unwrap_or_else(|| panic!("edge {edge} missing from report"));
        assert_eq!(
            findings.count_missing_values, 0,
            "edge {edge} has unresolved foreign keys on a clean run"
        );
        assert!(findings.examples.is_empty());
    }

    assert!(
        dir.join(verify::REPORT_FILE).exists(),
        "integrity report artifact not written"
    );
    assert!(dir.join("manifest.csv").exists(), "manifest not written");

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn corrupted_merchant_id_is_reported_with_the_offending_row() {
    let dir = scratch_dir("ref-corrupt");
    GenEngine::new(DatasetSpec::default_test(), RunOptions::seeded(12))
        .run(&dir)
        .expect("pipeline run");

    // Corrupt one merchant_id in the written txn table, then rerun only
    // the verifier.
    let txn_path = dir.join("txn.csv");
    let content = fs::read_to_string(&txn_path).expect("read txn.csv");
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    assert!(lines.len() > 1, "txn.csv has no data rows to corrupt");

    let merchant_idx = lines[0]
        .split(',')
        .position(|h| h == "merchant_id")
        .expect("merchant_id column present");
    let mut fields: Vec<String> = lines[1].split(',').map(String::from).collect();
    fields[merchant_idx] = "999999999".to_string();
    lines[1] = fields.join(",");
    fs::write(&txn_path, lines.join("\n") + "\n").expect("rewrite txn.csv");

    let report = verify::run(&dir).expect("verifier rerun");
    let findings = &report["txn.merchant_id"];
    assert_eq!(findings.count_missing_values, 1);
    assert_eq!(findings.examples.len(), 1);
    assert_eq!(findings.examples[0]["merchant_id"], "999999999");

    // The other edges are untouched.
    assert_eq!(report["txn.account_id"].count_missing_values, 0);
    assert_eq!(report["case_link.txn_id"].count_missing_values, 0);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn empty_foreign_key_counts_as_missing() {
    let dir = scratch_dir("ref-empty-fk");
    GenEngine::new(DatasetSpec::default_test(), RunOptions::seeded(13))
        .run(&dir)
        .expect("pipeline run");

    let account_path = dir.join("account.csv");
    let content = fs::read_to_string(&account_path).expect("read account.csv");
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    let customer_idx = lines[0]
        .split(',')
        .position(|h| h == "customer_id")
        .expect("customer_id column present");
    let mut fields: Vec<String> = lines[1].split(',').map(String::from).collect();
    fields[customer_idx] = String::new();
    lines[1] = fields.join(",");
    fs::write(&account_path, lines.join("\n") + "\n").expect("rewrite account.csv");

    let report = verify::run(&dir).expect("verifier rerun");
    assert_eq!(report["account.customer_id"].count_missing_values, 1);

    let _ = fs::remove_dir_all(dir);
}
