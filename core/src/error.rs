use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parent table '{table}' is empty; cannot generate '{child}'")]
    EmptyParentTable {
        table: &'static str,
        child: &'static str,
    },

    #[error("Customer {customer_id} has no assigned devices")]
    NoAssignedDevices { customer_id: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GenResult<T> = Result<T, GenError>;
