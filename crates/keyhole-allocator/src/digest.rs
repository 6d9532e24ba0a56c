use crate::CodeAllocator;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use keyhole_core::{AllocationError, ShortCode};
use sha2::{Digest, Sha256};

/// Deterministic allocation strategy.
///
/// The candidate is a fixed-length window over the URL-safe base64
/// encoding of the URL's SHA-256 digest. Attempt 0 is the plain digest
/// prefix, so the same URL always proposes the same first code; higher
/// attempts slide the window by one character so a code held by an
/// unrelated URL can be escaped while each proposal remains a pure
/// function of `(url, attempt)`.
#[derive(Debug, Clone)]
pub struct DigestAllocator {
    length: usize,
}

impl DigestAllocator {
    /// Creates an allocator producing codes of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl CodeAllocator for DigestAllocator {
    fn propose(&self, long_url: &str, attempt: u32) -> Result<ShortCode, AllocationError> {
        let digest = Sha256::digest(long_url.as_bytes());
        let encoded = URL_SAFE_NO_PAD.encode(digest);

        let start = attempt as usize;
        let end = start.saturating_add(self.length);
        if end > encoded.len() {
            return Err(AllocationError::CodeSpaceExhausted(format!(
                "attempt {} exceeds the {}-character digest window for code length {}",
                attempt,
                encoded.len(),
                self.length
            )));
        }

        Ok(ShortCode::new_unchecked(&encoded[start..end]))
    }

    fn deduplicates_by_url(&self) -> bool {
        true
    }
}
