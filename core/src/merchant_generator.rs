//! Merchant table generation. The merchant population scales with the
//! expected transaction volume and is independent of customers and
//! accounts.

use crate::{error::GenResult, fake, rng::GenRng, spec::DatasetSpec, types::MerchantId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const MCC_CODES: &[&str] = &["5311", "5411", "5812", "5999", "6011"];
const RISK_TAGS: &[&str] = &["low", "medium", "high"];

/// Merchant creation timestamps fall inside the five years before the
/// anchor (merchants predate the customer base).
const CREATED_WINDOW_DAYS: i64 = 1825;

/// Floor on the merchant population, regardless of transaction volume.
const MIN_MERCHANTS: u64 = 50;

/// Merchants per expected transaction over the whole simulated window.
const MERCHANTS_PER_EXPECTED_TXN: f64 = 0.02;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantRow {
    pub merchant_id: MerchantId,
    pub mcc: String,
    pub name: String,
    pub country: String,
    pub risk_tag: String,
    pub created_at: String,
}

pub fn generate(
    spec: &DatasetSpec,
    scale_factor: f64,
    as_of: DateTime<Utc>,
    rng: &mut GenRng,
) -> GenResult<Vec<MerchantRow>> {
    let expected_txns = spec.txns_per_day_mean * spec.txn_days as f64 * scale_factor;
    let count = ((MERCHANTS_PER_EXPECTED_TXN * expected_txns) as u64).max(MIN_MERCHANTS);
    let window_start = as_of - Duration::days(CREATED_WINDOW_DAYS);

    let mut rows = Vec::with_capacity(count as usize);
    for merchant_id in 1..=count {
        rows.push(MerchantRow {
            merchant_id,
            mcc: rng.pick(MCC_CODES).to_string(),
            name: fake::company_name(rng),
            country: rng.pick(&spec.countries).clone(),
            risk_tag: rng.pick(RISK_TAGS).to_string(),
            created_at: fake::iso(fake::datetime_between(rng, window_start, as_of)),
        });
    }
    Ok(rows)
}
