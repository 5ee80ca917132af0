use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to encode ledger snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
