use thiserror::Error;

/// Errors that abort an engine operation outright.
///
/// Per-slot and per-credential failures never surface here; they are
/// logged and skipped inside the operation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] slotwarden_store::StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
