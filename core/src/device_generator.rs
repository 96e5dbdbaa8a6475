//! Device table generation. Devices are minted per customer but live in a
//! shared global pool; the assignment stage decides which customer uses
//! which device.

use crate::{
    customer_generator::CustomerRow,
    error::{GenError, GenResult},
    fake,
    rng::GenRng,
    spec::DatasetSpec,
    types::DeviceId,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const RISK_REPUTATIONS: &[&str] = &["low", "medium", "high"];

/// First-seen timestamps fall inside the two years before the anchor.
const FIRST_SEEN_WINDOW_DAYS: i64 = 730;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRow {
    pub device_id: DeviceId,
    pub device_fingerprint: String,
    pub first_seen_ts: String,
    pub risk_reputation: String,
    pub last_ip: String,
    pub last_country: String,
    pub created_at: String,
}

pub fn generate(
    customers: &[CustomerRow],
    spec: &DatasetSpec,
    as_of: DateTime<Utc>,
    rng: &mut GenRng,
) -> GenResult<Vec<DeviceRow>> {
    if customers.is_empty() {
        return Err(GenError::EmptyParentTable {
            table: "customer",
            child: "device",
        });
    }

    let window_start = as_of - Duration::days(FIRST_SEEN_WINDOW_DAYS);

    let mut rows = Vec::with_capacity(customers.len());
    let mut device_id: DeviceId = 1;
    for _ in customers {
        let n = rng.poisson_at_least(spec.n_devices_per_customer_mean, 1);
        for _ in 0..n {
            let first_seen_ts = fake::iso(fake::datetime_between(rng, window_start, as_of));
            let risk_reputation = if rng.next_f64() > spec.low_rep_device_rate {
                rng.pick(RISK_REPUTATIONS).to_string()
            } else {
                "low".to_string()
            };
            rows.push(DeviceRow {
                device_id,
                device_fingerprint: fake::device_fingerprint(rng),
                first_seen_ts: first_seen_ts.clone(),
                risk_reputation,
                last_ip: fake::public_ipv4(rng),
                last_country: rng.pick(&spec.countries).clone(),
                created_at: first_seen_ts,
            });
            device_id += 1;
        }
    }
    Ok(rows)
}
