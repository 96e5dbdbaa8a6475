//! Integrity verifier: re-derives every foreign-key relationship from the
//! written tables and reports the rows that fail to resolve.
//!
//! The verifier reads the CSV files back from disk, never the in-memory
//! tables, so serialization bugs are caught alongside generation bugs. It
//! is read-only and purely diagnostic: findings land in the report
//! artifact, they never abort the pipeline. An empty foreign-key value and
//! a value absent from the parent key set are the same defect class.

use crate::{error::GenResult, writer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Row snapshots captured per edge are capped at this many.
const MAX_EXAMPLES: usize = 5;

pub const REPORT_FILE: &str = "integrity_report.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeReport {
    pub count_missing_values: u64,
    pub examples: Vec<BTreeMap<String, String>>,
}

/// Edge name (e.g. "txn.merchant_id") to its findings, in stable order.
pub type IntegrityReport = BTreeMap<String, EdgeReport>;

/// Scan every declared foreign-key edge across the written tables.
pub fn run(out_dir: &Path) -> GenResult<IntegrityReport> {
    let customer_keys = load_key_set(&out_dir.join(writer::CUSTOMER_FILE), "customer_id")?;
    let account_keys = load_key_set(&out_dir.join(writer::ACCOUNT_FILE), "account_id")?;
    let device_keys = load_key_set(&out_dir.join(writer::DEVICE_FILE), "device_id")?;
    let merchant_keys = load_key_set(&out_dir.join(writer::MERCHANT_FILE), "merchant_id")?;
    let txn_keys = load_key_set(&out_dir.join(writer::TXN_FILE), "txn_id")?;

    let account_path = out_dir.join(writer::ACCOUNT_FILE);
    let login_path = out_dir.join(writer::LOGIN_EVENT_FILE);
    let txn_path = out_dir.join(writer::TXN_FILE);
    let case_link_path = out_dir.join(writer::CASE_LINK_FILE);

    let mut report = IntegrityReport::new();
    report.insert(
        "account.customer_id".into(),
        find_missing(&customer_keys, &account_path, "customer_id")?,
    );
    report.insert(
        "login_event.customer_id".into(),
        find_missing(&customer_keys, &login_path, "customer_id")?,
    );
    report.insert(
        "login_event.device_id".into(),
        find_missing(&device_keys, &login_path, "device_id")?,
    );
    report.insert(
        "txn.account_id".into(),
        find_missing(&account_keys, &txn_path, "account_id")?,
    );
    report.insert(
        "txn.customer_id".into(),
        find_missing(&customer_keys, &txn_path, "customer_id")?,
    );
    report.insert(
        "txn.merchant_id".into(),
        find_missing(&merchant_keys, &txn_path, "merchant_id")?,
    );
    report.insert(
        "txn.device_id".into(),
        find_missing(&device_keys, &txn_path, "device_id")?,
    );
    report.insert(
        "case_link.txn_id".into(),
        find_missing(&txn_keys, &case_link_path, "txn_id")?,
    );
    Ok(report)
}

/// Write the report artifact next to the tables.
pub fn write_report(out_dir: &Path, report: &IntegrityReport) -> GenResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(out_dir.join(REPORT_FILE), json)?;
    Ok(())
}

/// Collect the non-empty values of one column as the parent key set.
fn load_key_set(path: &Path, key: &str) -> GenResult<HashSet<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let idx = reader.headers()?.iter().position(|h| h == key);
    let mut keys = HashSet::new();
    if let Some(idx) = idx {
        for record in reader.records() {
            let record = record?;
            if let Some(value) = record.get(idx) {
                if !value.is_empty() {
                    keys.insert(value.to_string());
                }
            }
        }
    }
    Ok(keys)
}

fn find_missing(
    parent_keys: &HashSet<String>,
    child_path: &Path,
    fk: &str,
) -> GenResult<EdgeReport> {
    let mut reader = csv::Reader::from_path(child_path)?;
    let headers = reader.headers()?.clone();
    let idx = headers.iter().position(|h| h == fk);

    let mut count_missing_values = 0u64;
    let mut examples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let value = idx.and_then(|i| record.get(i)).unwrap_or("");
        if value.is_empty() || !parent_keys.contains(value) {
            count_missing_values += 1;
            if examples.len() < MAX_EXAMPLES {
                examples.push(snapshot(&headers, &record));
            }
        }
    }
    Ok(EdgeReport {
        count_missing_values,
        examples,
    })
}

fn snapshot(
    headers: &csv::StringRecord,
    record: &csv::StringRecord,
) -> BTreeMap<String, String> {
    headers
        .iter()
        .zip(record.iter())
        .map(|(h, v)| (h.to_string(), v.to_string()))
        .collect()
}
