use crate::error::StoreError;
use crate::mapping::LinkMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Outcome of a conditional insert.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// The code was free and the mapping was persisted.
    Created(LinkMapping),
    /// The code is already held by an existing mapping; nothing was written.
    Conflict,
}

/// The persistence boundary for link mappings.
///
/// The store is the sole arbiter of short-code uniqueness. Callers never
/// take in-process locks around it: atomicity is delegated entirely to
/// the backend's uniqueness constraint and its conflict reporting.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Retrieves the mapping for a given short code.
    /// Returns `None` if the code does not exist.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<LinkMapping>>;

    /// Retrieves an existing mapping for a long URL, if any.
    ///
    /// Used by the deterministic allocation strategy's idempotence path.
    /// When several mappings share the URL, the oldest one is returned.
    async fn find_by_url(&self, long_url: &str) -> Result<Option<LinkMapping>>;

    /// Atomically inserts a new mapping unless the code is already taken.
    ///
    /// Two concurrent callers inserting the same code must never both
    /// observe [`InsertOutcome::Created`].
    async fn insert_if_absent(&self, code: &ShortCode, long_url: &str) -> Result<InsertOutcome>;
}
