//! Table writer: serializes each in-memory table to a fixed-schema CSV.
//!
//! The header is always written from the declared column list, even for an
//! empty table, and every declared column appears in every row (empty when
//! a value is absent). Downstream consumers rely on this schema stability.
//! Row structs keep their fields in declared column order; the writer runs
//! with serde headers disabled so the declaration below is the single
//! source of truth.
//!
//! Any I/O failure here is fatal: a partial dataset is not a valid dataset.

use crate::{engine::Dataset, error::GenResult};
use serde::Serialize;
use std::path::Path;

pub const CUSTOMER_FILE: &str = "customer.csv";
pub const ACCOUNT_FILE: &str = "account.csv";
pub const DEVICE_FILE: &str = "device.csv";
pub const MERCHANT_FILE: &str = "merchant.csv";
pub const LOGIN_EVENT_FILE: &str = "login_event.csv";
pub const TXN_FILE: &str = "txn.csv";
pub const CASE_LINK_FILE: &str = "case_link.csv";
pub const CASE_ALERT_FILE: &str = "case_alert.csv";

/// Every output table, in write order.
pub const TABLE_FILES: &[&str] = &[
    CUSTOMER_FILE,
    ACCOUNT_FILE,
    DEVICE_FILE,
    MERCHANT_FILE,
    LOGIN_EVENT_FILE,
    TXN_FILE,
    CASE_LINK_FILE,
    CASE_ALERT_FILE,
];

pub const CUSTOMER_COLUMNS: &[&str] = &[
    "customer_id",
    "person_hash",
    "first_seen_ts",
    "kyc_status",
    "pep_flag",
    "sanctions_hit",
    "record_src",
    "created_at",
];

pub const ACCOUNT_COLUMNS: &[&str] = &[
    "account_id",
    "customer_id",
    "product_type",
    "open_dt",
    "status",
    "created_at",
];

pub const DEVICE_COLUMNS: &[&str] = &[
    "device_id",
    "device_fingerprint",
    "first_seen_ts",
    "risk_reputation",
    "last_ip",
    "last_country",
    "created_at",
];

pub const MERCHANT_COLUMNS: &[&str] =
    &["merchant_id", "mcc", "name", "country", "risk_tag", "created_at"];

pub const LOGIN_EVENT_COLUMNS: &[&str] = &[
    "login_id",
    "customer_id",
    "device_id",
    "login_ts",
    "ip",
    "country",
    "success",
    "mfa_passed",
    "created_at",
];

pub const TXN_COLUMNS: &[&str] = &[
    "txn_id",
    "account_id",
    "customer_id",
    "merchant_id",
    "txn_ts",
    "amount_cents",
    "currency",
    "channel",
    "device_id",
    "ip",
    "country",
    "auth_result",
    "label_fraud",
    "chargeback_flag",
    "created_at",
];

pub const CASE_LINK_COLUMNS: &[&str] = &["case_id", "txn_id"];

pub const CASE_ALERT_COLUMNS: &[&str] = &[
    "case_id",
    "opened_ts",
    "status",
    "priority",
    "reason_code",
    "risk_score",
    "assigned_to",
    "created_at",
];

pub fn write_dataset(out_dir: &Path, dataset: &Dataset) -> GenResult<()> {
    std::fs::create_dir_all(out_dir)?;
    write_table(&out_dir.join(CUSTOMER_FILE), CUSTOMER_COLUMNS, &dataset.customers)?;
    write_table(&out_dir.join(ACCOUNT_FILE), ACCOUNT_COLUMNS, &dataset.accounts)?;
    write_table(&out_dir.join(DEVICE_FILE), DEVICE_COLUMNS, &dataset.devices)?;
    write_table(&out_dir.join(MERCHANT_FILE), MERCHANT_COLUMNS, &dataset.merchants)?;
    write_table(
        &out_dir.join(LOGIN_EVENT_FILE),
        LOGIN_EVENT_COLUMNS,
        &dataset.logins,
    )?;
    write_table(&out_dir.join(TXN_FILE), TXN_COLUMNS, &dataset.txns)?;
    write_table(
        &out_dir.join(CASE_LINK_FILE),
        CASE_LINK_COLUMNS,
        &dataset.case_links,
    )?;
    write_table(
        &out_dir.join(CASE_ALERT_FILE),
        CASE_ALERT_COLUMNS,
        &dataset.case_alerts,
    )?;
    Ok(())
}

fn write_table<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> GenResult<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
