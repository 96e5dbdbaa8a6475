//! Login event generation. Device ids are drawn from each customer's
//! assigned devices only, so the device foreign key holds by construction.

use crate::{
    assignment::DeviceAssignments,
    customer_generator::CustomerRow,
    error::{GenError, GenResult},
    fake,
    rng::GenRng,
    types::{CustomerId, DeviceId, LoginId},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const LOGINS_PER_CUSTOMER_MEAN: f64 = 2.0;

/// Login timestamps fall inside the 90 days before the anchor.
const LOGIN_WINDOW_DAYS: i64 = 90;

const LOGIN_SUCCESS_RATE: f64 = 0.75;
const MFA_PASS_RATE: f64 = 2.0 / 3.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginEventRow {
    pub login_id: LoginId,
    pub customer_id: CustomerId,
    pub device_id: DeviceId,
    pub login_ts: String,
    pub ip: String,
    pub country: String,
    pub success: bool,
    pub mfa_passed: bool,
    pub created_at: String,
}

pub fn generate(
    customers: &[CustomerRow],
    assignments: &DeviceAssignments,
    countries: &[String],
    as_of: DateTime<Utc>,
    rng: &mut GenRng,
) -> GenResult<Vec<LoginEventRow>> {
    if customers.is_empty() {
        return Err(GenError::EmptyParentTable {
            table: "customer",
            child: "login_event",
        });
    }

    let window_start = as_of - Duration::days(LOGIN_WINDOW_DAYS);

    let mut rows = Vec::with_capacity(customers.len() * 2);
    let mut login_id: LoginId = 1;
    for customer in customers {
        let n = rng.poisson_at_least(LOGINS_PER_CUSTOMER_MEAN, 1);
        for _ in 0..n {
            let device_id = assignments.pick_for(customer.customer_id, rng)?;
            let login_ts = fake::iso(fake::datetime_between(rng, window_start, as_of));
            rows.push(LoginEventRow {
                login_id,
                customer_id: customer.customer_id,
                device_id,
                login_ts: login_ts.clone(),
                ip: fake::public_ipv4(rng),
                country: rng.pick(countries).clone(),
                success: rng.chance(LOGIN_SUCCESS_RATE),
                mfa_passed: rng.chance(MFA_PASS_RATE),
                created_at: login_ts,
            });
            login_id += 1;
        }
    }
    Ok(rows)
}
