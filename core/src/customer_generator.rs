//! Customer table generation. Customers are the root of the dependency
//! graph; every other entity references them directly or transitively.

use crate::{error::GenResult, fake, rng::GenRng, spec::DatasetSpec, types::CustomerId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const KYC_STATUSES: &[&str] = &["passed", "pending", "failed"];
const PEP_FLAGS: &[&str] = &["Y", "N"];
const RECORD_SOURCES: &[&str] = &["sim", "import"];

/// First-seen timestamps fall inside the two years before the anchor.
const FIRST_SEEN_WINDOW_DAYS: i64 = 730;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRow {
    pub customer_id: CustomerId,
    pub person_hash: String,
    pub first_seen_ts: String,
    pub kyc_status: String,
    pub pep_flag: String,
    pub sanctions_hit: Option<String>,
    pub record_src: String,
    pub created_at: String,
}

pub fn generate(
    spec: &DatasetSpec,
    scale_factor: f64,
    as_of: DateTime<Utc>,
    rng: &mut GenRng,
) -> GenResult<Vec<CustomerRow>> {
    let count = ((spec.n_customers as f64 * scale_factor).ceil() as u64).max(1);
    let window_start = as_of - Duration::days(FIRST_SEEN_WINDOW_DAYS);

    let mut rows = Vec::with_capacity(count as usize);
    for customer_id in 1..=count {
        let first_seen_ts = fake::iso(fake::datetime_between(rng, window_start, as_of));
        rows.push(CustomerRow {
            customer_id,
            person_hash: fake::person_hash(rng),
            first_seen_ts: first_seen_ts.clone(),
            kyc_status: rng.pick(KYC_STATUSES).to_string(),
            pep_flag: rng.pick(PEP_FLAGS).to_string(),
            sanctions_hit: if rng.chance(0.5) {
                Some("OFAC".to_string())
            } else {
                None
            },
            record_src: rng.pick(RECORD_SOURCES).to_string(),
            created_at: first_seen_ts,
        });
    }
    Ok(rows)
}
