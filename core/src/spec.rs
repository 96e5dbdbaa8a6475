//! The declarative dataset specification.
//!
//! A JSON mapping of counts, rates, and enumerations. Every field is
//! optional; missing fields fall back to the documented defaults below.
//! An unreadable file is a fatal configuration error, surfaced before any
//! generation starts.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetSpec {
    /// Base customer population, scaled by the run's scale factor.
    pub n_customers: u64,
    /// Poisson mean for devices per customer (floored at 1).
    pub n_devices_per_customer_mean: f64,
    /// Poisson mean for accounts per customer (floored at 1).
    pub n_accounts_per_customer_mean: f64,
    /// Number of simulated transaction days.
    pub txn_days: u32,
    /// Poisson mean for transactions per simulated day.
    pub txns_per_day_mean: f64,
    /// Probability a transaction is labeled as fraud.
    pub fraud_rate: f64,
    /// Probability a transaction's country is swapped for a different one.
    pub geo_mismatch_rate: f64,
    /// Probability a device's reputation is forced to "low".
    pub low_rep_device_rate: f64,
    /// Probability a transaction amount comes from the high-value band.
    pub high_amount_rate: f64,
    /// Transaction channels, drawn uniformly.
    pub channels: Vec<String>,
    /// Country codes, drawn uniformly.
    pub countries: Vec<String>,
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self {
            n_customers: 5000,
            n_devices_per_customer_mean: 1.3,
            n_accounts_per_customer_mean: 1.2,
            txn_days: 60,
            txns_per_day_mean: 2500.0,
            fraud_rate: 0.005,
            geo_mismatch_rate: 0.02,
            low_rep_device_rate: 0.04,
            high_amount_rate: 0.03,
            channels: ["card_present", "ecommerce", "ach", "wire"]
                .map(String::from)
                .to_vec(),
            countries: ["US", "CA", "GB", "DE", "IN"].map(String::from).to_vec(),
        }
    }
}

impl DatasetSpec {
    /// Load a specification file. Missing file or malformed JSON is fatal.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let spec: DatasetSpec = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Malformed spec {}: {e}", path.display()))?;
        Ok(spec)
    }

    /// Small population for unit and integration tests.
    pub fn default_test() -> Self {
        Self {
            n_customers: 25,
            txn_days: 3,
            txns_per_day_mean: 40.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_documented_defaults() {
        let spec: DatasetSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(spec.n_customers, 5000);
        assert_eq!(spec.txn_days, 60);
        assert_eq!(spec.txns_per_day_mean, 2500.0);
        assert_eq!(spec.fraud_rate, 0.005);
        assert_eq!(spec.channels.len(), 4);
        assert_eq!(spec.countries.len(), 5);
    }

    #[test]
    fn partial_spec_keeps_defaults_for_missing_fields() {
        let spec: DatasetSpec =
            serde_json::from_str(r#"{"n_customers": 10, "fraud_rate": 1.0}"#).unwrap();
        assert_eq!(spec.n_customers, 10);
        assert_eq!(spec.fraud_rate, 1.0);
        assert_eq!(spec.txn_days, 60);
        assert_eq!(spec.countries, ["US", "CA", "GB", "DE", "IN"]);
    }
}
