use thiserror::Error;

/// Errors raised while producing a candidate short code.
#[derive(Debug, Clone, Error)]
pub enum AllocationError {
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("code space exhausted: {0}")]
    CodeSpaceExhausted(String),
}

/// Errors raised by a [`LinkStore`][crate::store::LinkStore] backend.
///
/// A short-code conflict is deliberately not an error: it is a normal
/// outcome of `insert_if_absent` and is reported through
/// [`InsertOutcome`][crate::store::InsertOutcome] instead.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by the shortening service at the request boundary.
#[derive(Debug, Clone, Error)]
pub enum ShortenError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("allocation failed: {0}")]
    Allocation(#[from] AllocationError),
    #[error("collision retries exhausted after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
