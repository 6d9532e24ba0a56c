use crate::entropy::{EntropySource, OsEntropy};
use crate::CodeAllocator;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use keyhole_core::{AllocationError, ShortCode};

/// Random allocation strategy.
///
/// Each proposal draws fresh secure random bytes from the injected
/// [`EntropySource`], encodes them with the URL-safe base64 alphabet
/// (unpadded) and truncates to the configured length. Proposals are
/// independent of the URL and of each other, so a retry after a
/// collision is a genuinely new draw, never a derived one.
#[derive(Debug)]
pub struct RandomAllocator<E = OsEntropy> {
    length: usize,
    entropy: E,
}

impl RandomAllocator<OsEntropy> {
    /// Creates an allocator producing codes of `length` characters,
    /// backed by the OS RNG.
    pub fn new(length: usize) -> Self {
        Self::with_entropy(length, OsEntropy)
    }
}

impl<E: EntropySource> RandomAllocator<E> {
    /// Creates an allocator with an explicit entropy source.
    pub fn with_entropy(length: usize, entropy: E) -> Self {
        Self { length, entropy }
    }
}

impl<E: EntropySource> CodeAllocator for RandomAllocator<E> {
    fn propose(&self, _long_url: &str, _attempt: u32) -> Result<ShortCode, AllocationError> {
        // `length` raw bytes encode to at least `length` base64 characters.
        let mut bytes = vec![0u8; self.length];
        self.entropy.fill(&mut bytes)?;

        let mut encoded = URL_SAFE_NO_PAD.encode(&bytes);
        encoded.truncate(self.length);
        Ok(ShortCode::new_unchecked(encoded))
    }
}
