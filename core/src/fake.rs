//! Deterministic fake-value generation from curated lists.
//!
//! Provides the synthetic identity material for the dataset: person hashes,
//! device fingerprints, public IPs, merchant names, and bounded random
//! timestamps. All generation is deterministic (same RNG seed = same
//! values); nothing here touches the clock or a platform RNG.

use crate::rng::GenRng;
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

/// Render a timestamp as ISO-8601 with an explicit UTC offset.
pub fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// 64 lowercase hex chars, shaped like a SHA-256 digest.
pub fn person_hash(rng: &mut GenRng) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(64);
    for _ in 0..4 {
        let _ = write!(out, "{:016x}", rng.next_u64());
    }
    out
}

/// A v4-format UUID built from RNG bytes, so fingerprints stay
/// reproducible under a seed.
pub fn device_fingerprint(rng: &mut GenRng) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

/// First octets chosen from routable unicast space (no RFC1918, loopback,
/// or multicast prefixes).
const PUBLIC_FIRST_OCTETS: &[u8] = &[
    23, 34, 45, 52, 64, 81, 93, 104, 131, 151, 165, 185, 199, 203, 212,
];

pub fn public_ipv4(rng: &mut GenRng) -> String {
    let a = *rng.pick(PUBLIC_FIRST_OCTETS);
    let b = rng.next_u64_below(256);
    let c = rng.next_u64_below(256);
    let d = 1 + rng.next_u64_below(254);
    format!("{a}.{b}.{c}.{d}")
}

const MERCHANT_STEMS: &[&str] = &[
    "Harbor", "Cedar", "Summit", "Lakeside", "Ironwood", "Beacon", "Juniper", "Atlas",
    "Crescent", "Pioneer", "Redstone", "Halcyon", "Meridian", "Bluebird", "Granite", "Orchard",
    "Willow", "Falcon", "Copper", "Northgate",
];

const MERCHANT_TRADES: &[&str] = &[
    "Grocery", "Hardware", "Bistro", "Electronics", "Apparel", "Books", "Pharmacy", "Coffee",
    "Motors", "Outfitters", "Jewelers", "Market", "Liquors", "Travel", "Florist", "Sporting Goods",
];

const MERCHANT_SUFFIXES: &[&str] = &["LLC", "Inc", "Co", "Group", "Ltd", "Bros"];

/// Generate a merchant trading name, with or without a legal suffix.
pub fn company_name(rng: &mut GenRng) -> String {
    let stem = *rng.pick(MERCHANT_STEMS);
    let trade = *rng.pick(MERCHANT_TRADES);
    if rng.chance(0.5) {
        let suffix = *rng.pick(MERCHANT_SUFFIXES);
        format!("{stem} {trade} {suffix}")
    } else {
        format!("{stem} {trade}")
    }
}

/// Uniform timestamp in [start, end], second resolution.
pub fn datetime_between(
    rng: &mut GenRng,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let span = (end - start).num_seconds().max(0);
    start + Duration::seconds(rng.int_between(0, span))
}

/// Uniform date in [start, end].
pub fn date_between(rng: &mut GenRng, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.int_between(0, span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_values_are_deterministic_per_seed() {
        let mut a = GenRng::seeded(42);
        let mut b = GenRng::seeded(42);
        assert_eq!(person_hash(&mut a), person_hash(&mut b));
        assert_eq!(device_fingerprint(&mut a), device_fingerprint(&mut b));
        assert_eq!(public_ipv4(&mut a), public_ipv4(&mut b));
        assert_eq!(company_name(&mut a), company_name(&mut b));
    }

    #[test]
    fn person_hash_looks_like_a_digest() {
        let mut rng = GenRng::seeded(1);
        let hash = person_hash(&mut rng);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn device_fingerprint_parses_as_uuid() {
        let mut rng = GenRng::seeded(1);
        for _ in 0..50 {
            let fp = device_fingerprint(&mut rng);
            let parsed = uuid::Uuid::parse_str(&fp).expect("valid uuid");
            assert_eq!(parsed.get_version_num(), 4);
        }
    }

    #[test]
    fn public_ipv4_has_four_octets() {
        let mut rng = GenRng::seeded(9);
        for _ in 0..100 {
            let ip = public_ipv4(&mut rng);
            let octets: Vec<&str> = ip.split('.').collect();
            assert_eq!(octets.len(), 4, "bad ip {ip}");
            for octet in octets {
                let v: u32 = octet.parse().expect("numeric octet");
                assert!(v < 256);
            }
        }
    }

    #[test]
    fn datetime_between_respects_bounds() {
        let mut rng = GenRng::seeded(3);
        let start = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let end = DateTime::parse_from_rfc3339("2024-06-01T00:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        for _ in 0..200 {
            let ts = datetime_between(&mut rng, start, end);
            assert!(ts >= start && ts <= end);
        }
    }

    #[test]
    fn iso_renders_utc_offset() {
        let ts = DateTime::parse_from_rfc3339("2024-03-05T17:30:01+00:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(iso(ts), "2024-03-05T17:30:01+00:00");
    }
}
