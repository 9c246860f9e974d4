use thiserror::Error;

/// Failure to read from the off-chain publication store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The bundle exists but is not a publication record.
    #[error("malformed record {tx_id}: {reason}")]
    Malformed { tx_id: String, reason: String },
}

/// Failure of the result cache. Never fatal to a verification.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}
