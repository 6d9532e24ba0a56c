//! Short-code allocation strategies for the Keyhole URL shortener.
//!
//! Allocators are pure candidate producers: they never talk to storage.
//! Uniqueness is enforced downstream by the store's insert contract and
//! the service's collision-retry loop.

pub mod digest;
pub mod entropy;
pub mod random;

pub use digest::DigestAllocator;
pub use entropy::{EntropySource, FixedEntropy, OsEntropy};
pub use random::RandomAllocator;

use keyhole_core::{AllocationError, ShortCode};

/// Trait for proposing candidate short codes.
pub trait CodeAllocator: Send + Sync + 'static {
    /// Proposes a candidate short code for a long URL.
    ///
    /// `attempt` starts at 0 and is incremented by the caller after each
    /// code conflict. Implementations must yield a fresh candidate per
    /// attempt where they can; the output is always exactly the configured
    /// length and drawn from `[A-Za-z0-9_-]`.
    fn propose(&self, long_url: &str, attempt: u32) -> Result<ShortCode, AllocationError>;

    /// Whether the same URL always proposes the same first-attempt code.
    ///
    /// When true, the caller may short-circuit to an existing mapping for
    /// the URL instead of inserting a duplicate.
    fn deduplicates_by_url(&self) -> bool {
        false
    }
}
