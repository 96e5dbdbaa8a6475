//! gen-runner: headless synthetic fraud dataset generator.
//!
//! Usage:
//!   gen-runner --spec fraud.specs.json --out-dir data/ --seed 42
//!   gen-runner --spec fraud.specs.json --out-dir data/ --dry-run
//!   gen-runner --seed 42 --as-of 2026-01-01T00:00:00+00:00

use anyhow::Result;
use chrono::{DateTime, Utc};
use fraudgen_core::{
    engine::{GenEngine, RunOptions},
    spec::DatasetSpec,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let spec_path = arg_value(&args, "--spec").unwrap_or_else(|| "fraud.specs.json".to_string());
    let out_dir = arg_value(&args, "--out-dir").unwrap_or_else(|| ".".to_string());
    let seed: Option<u64> = match arg_value(&args, "--seed") {
        Some(s) => match s.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("ignoring unparsable --seed value '{s}'");
                None
            }
        },
        None => None,
    };
    let as_of: Option<DateTime<Utc>> = arg_value(&args, "--as-of")
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|t| t.with_timezone(&Utc));
    let dry_run = args.iter().any(|a| a == "--dry-run");

    let spec_path = Path::new(&spec_path);
    if !spec_path.exists() {
        anyhow::bail!("Spec file not found: {}", spec_path.display());
    }
    let spec = DatasetSpec::load(spec_path)?;

    println!("gen-runner — synthetic fraud dataset");
    println!("  spec:     {}", spec_path.display());
    println!("  out_dir:  {out_dir}");
    match seed {
        Some(s) => println!("  seed:     {s}"),
        None => println!("  seed:     (none, non-reproducible run)"),
    }
    println!("  dry_run:  {dry_run}");
    println!();

    let mut engine = GenEngine::new(
        spec,
        RunOptions {
            seed,
            as_of,
            dry_run,
        },
    );
    let report = engine.run(Path::new(&out_dir))?;

    let dangling: u64 = report
        .integrity
        .values()
        .map(|e| e.count_missing_values)
        .sum();

    println!("=== RUN SUMMARY ===");
    println!("  customers:    {}", report.counts.customers);
    println!("  accounts:     {}", report.counts.accounts);
    println!("  devices:      {}", report.counts.devices);
    println!("  merchants:    {}", report.counts.merchants);
    println!("  login events: {}", report.counts.logins);
    println!("  txns:         {}", report.counts.txns);
    println!("  cases:        {}", report.counts.cases);
    println!();
    println!("=== INTEGRITY ===");
    println!("  edges checked:      {}", report.integrity.len());
    println!("  missing fk values:  {dangling}");
    if dangling > 0 {
        for (edge, findings) in &report.integrity {
            if findings.count_missing_values > 0 {
                println!("    {edge}: {}", findings.count_missing_values);
            }
        }
    }
    Ok(())
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}
