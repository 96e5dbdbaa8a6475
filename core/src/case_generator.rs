//! Case generation: an investigative case links exactly one transaction
//! to one alert record.
//!
//! The case population is a deterministic function of the already
//! generated transaction table. Candidates are all fraud-labeled
//! transactions plus a small uniform sample of the non-fraud ones (so the
//! case set contains false-positive-like entries), truncated to roughly
//! one percent of total transaction volume. Fraud candidates fill the pool
//! first, so a high fraud rate squeezes the non-fraud sample out.

use crate::{
    error::GenResult,
    fake,
    rng::GenRng,
    txn_generator::TxnRow,
    types::{CaseId, TxnId},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const CASE_STATUSES: &[&str] = &["open", "closed", "investigating"];
const PRIORITIES: &[&str] = &["low", "medium", "high"];
const REASON_CODES: &[&str] = &["fraud", "chargeback", "kyc"];
const ASSIGNEES: &[&str] = &["analyst_1", "analyst_2", "auto"];

/// Share of total transactions the final case set may not exceed.
const CASE_POOL_CAP_RATE: f64 = 0.01;

/// Share of total transactions sampled from the non-fraud population.
const NONFRAUD_SAMPLE_RATE: f64 = 0.001;

/// Cases open up to this many days before the anchor.
const OPENED_LOOKBACK_DAYS: i64 = 30;

const RISK_SCORE_RANGE: (i64, i64) = (10, 99);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseLinkRow {
    pub case_id: CaseId,
    pub txn_id: TxnId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseAlertRow {
    pub case_id: CaseId,
    pub opened_ts: String,
    pub status: String,
    pub priority: String,
    pub reason_code: String,
    pub risk_score: u32,
    pub assigned_to: String,
    pub created_at: String,
}

/// Candidate transaction ids: every fraud-labeled transaction, then a
/// no-replacement sample of the non-fraud ones. Sampling from the
/// non-fraud side only keeps the pool free of duplicate transaction ids,
/// so no transaction ever carries two cases.
pub fn candidate_pool(txns: &[TxnRow], rng: &mut GenRng) -> Vec<TxnId> {
    let mut pool: Vec<TxnId> = txns
        .iter()
        .filter(|t| t.label_fraud == 1)
        .map(|t| t.txn_id)
        .collect();

    let non_fraud: Vec<TxnId> = txns
        .iter()
        .filter(|t| t.label_fraud == 0)
        .map(|t| t.txn_id)
        .collect();
    let sample_size = ((txns.len() as f64 * NONFRAUD_SAMPLE_RATE) as usize)
        .max(1)
        .min(non_fraud.len());
    pool.extend(sample_without_replacement(&non_fraud, sample_size, rng));
    pool
}

fn sample_without_replacement(items: &[TxnId], k: usize, rng: &mut GenRng) -> Vec<TxnId> {
    // Partial Fisher-Yates over an index scratch vector.
    let mut idx: Vec<usize> = (0..items.len()).collect();
    let mut out = Vec::with_capacity(k);
    for i in 0..k {
        let j = i + rng.next_u64_below((idx.len() - i) as u64) as usize;
        idx.swap(i, j);
        out.push(items[idx[i]]);
    }
    out
}

/// An empty transaction table yields an empty case set: with no parent
/// rows there is nothing a case link could dangle from.
pub fn generate(
    txns: &[TxnRow],
    as_of: DateTime<Utc>,
    rng: &mut GenRng,
) -> GenResult<(Vec<CaseLinkRow>, Vec<CaseAlertRow>)> {
    if txns.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let pool = candidate_pool(txns, rng);
    let cap = ((txns.len() as f64 * CASE_POOL_CAP_RATE) as usize).max(1);

    let mut links = Vec::with_capacity(cap);
    let mut alerts = Vec::with_capacity(cap);
    for (i, txn_id) in pool.into_iter().take(cap).enumerate() {
        let case_id = (i + 1) as CaseId;
        let opened = as_of - Duration::days(rng.int_between(0, OPENED_LOOKBACK_DAYS));
        let opened_ts = fake::iso(opened);
        links.push(CaseLinkRow { case_id, txn_id });
        alerts.push(CaseAlertRow {
            case_id,
            opened_ts: opened_ts.clone(),
            status: rng.pick(CASE_STATUSES).to_string(),
            priority: rng.pick(PRIORITIES).to_string(),
            reason_code: rng.pick(REASON_CODES).to_string(),
            risk_score: rng.int_between(RISK_SCORE_RANGE.0, RISK_SCORE_RANGE.1) as u32,
            assigned_to: rng.pick(ASSIGNEES).to_string(),
            created_at: opened_ts,
        });
    }
    Ok((links, alerts))
}
