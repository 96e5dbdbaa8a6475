//! Account table generation. Every customer owns at least one account;
//! transactions later choose an account first and derive the customer
//! from it.

use crate::{
    customer_generator::CustomerRow,
    error::{GenError, GenResult},
    fake,
    rng::GenRng,
    types::{AccountId, CustomerId},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const PRODUCT_TYPES: &[&str] = &["checking", "savings", "credit", "loan"];
const ACCOUNT_STATUSES: &[&str] = &["open", "closed", "dormant"];

/// Open dates fall inside the two years before the anchor.
const OPEN_WINDOW_DAYS: i64 = 730;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRow {
    pub account_id: AccountId,
    pub customer_id: CustomerId,
    pub product_type: String,
    pub open_dt: String,
    pub status: String,
    pub created_at: String,
}

pub fn generate(
    customers: &[CustomerRow],
    mean_per_customer: f64,
    as_of: DateTime<Utc>,
    rng: &mut GenRng,
) -> GenResult<Vec<AccountRow>> {
    if customers.is_empty() {
        return Err(GenError::EmptyParentTable {
            table: "customer",
            child: "account",
        });
    }

    let open_window_start = as_of.date_naive() - Duration::days(OPEN_WINDOW_DAYS);
    let created_at = fake::iso(as_of);

    let mut rows = Vec::with_capacity(customers.len());
    let mut account_id: AccountId = 1;
    for customer in customers {
        let n = rng.poisson_at_least(mean_per_customer, 1);
        for _ in 0..n {
            let open_dt = fake::date_between(rng, open_window_start, as_of.date_naive());
            rows.push(AccountRow {
                account_id,
                customer_id: customer.customer_id,
                product_type: rng.pick(PRODUCT_TYPES).to_string(),
                open_dt: open_dt.to_string(),
                status: rng.pick(ACCOUNT_STATUSES).to_string(),
                created_at: created_at.clone(),
            });
            account_id += 1;
        }
    }
    Ok(rows)
}
