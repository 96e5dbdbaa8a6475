//! Transaction table generation, with controlled anomaly injection: fraud
//! labels, geo mismatches, and high-value outliers.
//!
//! Accounts are chosen first and the customer is derived from the account,
//! never sampled independently, so the transaction's customer always
//! equals the owning account's customer. Devices are drawn from the
//! customer's assignment only.

use crate::{
    account_generator::AccountRow,
    assignment::DeviceAssignments,
    error::{GenError, GenResult},
    fake,
    merchant_generator::MerchantRow,
    rng::GenRng,
    spec::DatasetSpec,
    types::{AccountId, CustomerId, DeviceId, MerchantId, TxnId},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const CURRENCIES: &[&str] = &["USD", "CAD", "GBP", "EUR", "INR"];
const AUTH_RESULTS: &[&str] = &["approved", "declined", "blocked"];

/// Closed amount bands in minor currency units.
const LOW_AMOUNT_CENTS: (i64, i64) = (100, 20_000);
const HIGH_AMOUNT_CENTS: (i64, i64) = (20_000, 200_000);

/// Chargebacks are evaluated only for fraud-labeled transactions.
const CHARGEBACK_GIVEN_FRAUD_RATE: f64 = 0.15;

const LAST_SECOND_OF_DAY: i64 = 86_399;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxnRow {
    pub txn_id: TxnId,
    pub account_id: AccountId,
    pub customer_id: CustomerId,
    pub merchant_id: MerchantId,
    pub txn_ts: String,
    pub amount_cents: i64,
    pub currency: String,
    pub channel: String,
    pub device_id: DeviceId,
    pub ip: String,
    pub country: String,
    pub auth_result: String,
    pub label_fraud: u8,
    pub chargeback_flag: u8,
    pub created_at: String,
}

pub fn generate(
    spec: &DatasetSpec,
    scale_factor: f64,
    accounts: &[AccountRow],
    assignments: &DeviceAssignments,
    merchants: &[MerchantRow],
    as_of: DateTime<Utc>,
    rng: &mut GenRng,
) -> GenResult<Vec<TxnRow>> {
    if accounts.is_empty() {
        return Err(GenError::EmptyParentTable {
            table: "account",
            child: "txn",
        });
    }
    if merchants.is_empty() {
        return Err(GenError::EmptyParentTable {
            table: "merchant",
            child: "txn",
        });
    }

    let start = as_of - Duration::days(spec.txn_days as i64);
    let daily_mean = spec.txns_per_day_mean * scale_factor;
    let created_at = fake::iso(as_of);

    let mut rows = Vec::new();
    let mut txn_id: TxnId = 1;
    for day in 0..spec.txn_days {
        let n_today = rng.poisson(daily_mean);
        let day_base = start + Duration::days(day as i64);
        for _ in 0..n_today {
            let account = rng.pick(accounts);
            let device_id = assignments.pick_for(account.customer_id, rng)?;
            let merchant = rng.pick(merchants);
            let txn_ts = day_base + Duration::seconds(rng.int_between(0, LAST_SECOND_OF_DAY));

            let amount_cents = if rng.chance(spec.high_amount_rate) {
                rng.int_between(HIGH_AMOUNT_CENTS.0, HIGH_AMOUNT_CENTS.1)
            } else {
                rng.int_between(LOW_AMOUNT_CENTS.0, LOW_AMOUNT_CENTS.1)
            };

            let mut country = rng.pick(&spec.countries).clone();
            let is_fraud = rng.chance(spec.fraud_rate);

            // Geo-mismatch signal: swap in a country other than the one
            // just chosen.
            if spec.countries.len() > 1 && rng.chance(spec.geo_mismatch_rate) {
                loop {
                    let alt = rng.pick(&spec.countries);
                    if *alt != country {
                        country = alt.clone();
                        break;
                    }
                }
            }

            let chargeback =
                is_fraud && rng.chance(CHARGEBACK_GIVEN_FRAUD_RATE);

            rows.push(TxnRow {
                txn_id,
                account_id: account.account_id,
                customer_id: account.customer_id,
                merchant_id: merchant.merchant_id,
                txn_ts: fake::iso(txn_ts),
                amount_cents,
                currency: rng.pick(CURRENCIES).to_string(),
                channel: rng.pick(&spec.channels).clone(),
                device_id,
                ip: fake::public_ipv4(rng),
                country,
                auth_result: rng.pick(AUTH_RESULTS).to_string(),
                label_fraud: u8::from(is_fraud),
                chargeback_flag: u8::from(chargeback),
                created_at: created_at.clone(),
            });
            txn_id += 1;
        }
    }
    Ok(rows)
}
