use thiserror::Error;

/// Errors talking to the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport failure: connect, timeout, or body decode.
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned HTTP {status} for {path:?}")]
    Status { status: u16, path: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
