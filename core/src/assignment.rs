//! Customer to device assignment.
//!
//! A derived mapping, not a persisted table: built once after device
//! generation, read-only afterward. Every customer gets one or two devices
//! by advancing a single cursor round-robin through the global device
//! pool, wrapping when the pool runs out. No customer is ever left without
//! a device, even when the pool is smaller than the demand.

use crate::{
    customer_generator::CustomerRow,
    device_generator::DeviceRow,
    error::{GenError, GenResult},
    rng::GenRng,
    types::{CustomerId, DeviceId},
};
use std::collections::HashMap;

const MIN_DEVICES_PER_CUSTOMER: u64 = 1;
const MAX_DEVICES_PER_CUSTOMER: u64 = 2;

#[derive(Debug, Default)]
pub struct DeviceAssignments {
    by_customer: HashMap<CustomerId, Vec<DeviceId>>,
}

pub fn assign(
    customers: &[CustomerRow],
    devices: &[DeviceRow],
    rng: &mut GenRng,
) -> GenResult<DeviceAssignments> {
    if devices.is_empty() {
        return Err(GenError::EmptyParentTable {
            table: "device",
            child: "customer_device_assignment",
        });
    }

    let mut by_customer = HashMap::with_capacity(customers.len());
    let mut cursor = 0usize;
    for customer in customers {
        let span = MAX_DEVICES_PER_CUSTOMER - MIN_DEVICES_PER_CUSTOMER + 1;
        let n = MIN_DEVICES_PER_CUSTOMER + rng.next_u64_below(span);
        let mut assigned = Vec::with_capacity(n as usize);
        for _ in 0..n {
            cursor %= devices.len();
            assigned.push(devices[cursor].device_id);
            cursor += 1;
        }
        by_customer.insert(customer.customer_id, assigned);
    }
    Ok(DeviceAssignments { by_customer })
}

impl DeviceAssignments {
    /// The ordered device list for a customer. A customer with no
    /// assignment is an invariant violation, surfaced loudly rather than
    /// letting a dependent generator emit a dangling reference.
    pub fn devices_for(&self, customer_id: CustomerId) -> GenResult<&[DeviceId]> {
        match self.by_customer.get(&customer_id) {
            Some(devices) if !devices.is_empty() => Ok(devices),
            _ => Err(GenError::NoAssignedDevices { customer_id }),
        }
    }

    /// Uniform draw from the customer's assigned devices only, never from
    /// the global pool.
    pub fn pick_for(&self, customer_id: CustomerId, rng: &mut GenRng) -> GenResult<DeviceId> {
        let devices = self.devices_for(customer_id)?;
        Ok(devices[rng.next_u64_below(devices.len() as u64) as usize])
    }

    pub fn len(&self) -> usize {
        self.by_customer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_customer.is_empty()
    }
}
