//! fraudgen-core: relationally-consistent synthetic fraud dataset
//! generation.
//!
//! Derives eight interdependent tables (customers through case alerts)
//! from a declarative specification, writes them as fixed-schema CSVs,
//! then re-reads its own output and checks every declared foreign-key
//! edge.
//!
//! RULES:
//!   - Generators run in a fixed dependency order; parents always exist
//!     before children reference them.
//!   - Nothing calls a platform RNG. All randomness flows through the one
//!     GenRng context created at run start from an optional seed.

pub mod account_generator;
pub mod assignment;
pub mod case_generator;
pub mod customer_generator;
pub mod device_generator;
pub mod engine;
pub mod error;
pub mod fake;
pub mod login_generator;
pub mod manifest;
pub mod merchant_generator;
pub mod rng;
pub mod spec;
pub mod txn_generator;
pub mod types;
pub mod verify;
pub mod writer;

pub use engine::{Dataset, GenEngine, RunOptions, RunReport};
pub use error::{GenError, GenResult};
pub use spec::DatasetSpec;
