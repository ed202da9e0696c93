use thiserror::Error;

/// Error type shared by every `ModelStore` operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// The cursor did not decode, or was issued for another collection.
    #[error("invalid scan cursor: {0}")]
    InvalidCursor(String),
    /// The store handed back the cursor it was given, so the scan made no progress.
    #[error("scan of {collection} stalled at cursor {cursor}")]
    StalledScan { collection: String, cursor: String },
    /// The backend could not serve the call (connectivity, throttling, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
