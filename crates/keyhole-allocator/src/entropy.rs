use keyhole_core::AllocationError;
use rand::rngs::OsRng;
use rand::TryRngCore;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A source of cryptographically secure random bytes.
///
/// Injected into [`RandomAllocator`][crate::RandomAllocator] so tests can
/// substitute a deterministic sequence.
pub trait EntropySource: Send + Sync + 'static {
    /// Fills `buf` with random bytes, or fails if the source is unavailable.
    fn fill(&self, buf: &mut [u8]) -> Result<(), AllocationError>;
}

/// Entropy backed by the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), AllocationError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| AllocationError::EntropyUnavailable(e.to_string()))
    }
}

/// Replays a scripted sequence of byte blocks, one block per `fill` call.
///
/// Fails with `EntropyUnavailable` once the sequence is exhausted, which
/// doubles as a way to exercise the entropy-failure path in tests.
#[derive(Debug, Default)]
pub struct FixedEntropy {
    blocks: Mutex<VecDeque<Vec<u8>>>,
}

impl FixedEntropy {
    pub fn new(blocks: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            blocks: Mutex::new(blocks.into_iter().collect()),
        }
    }
}

impl EntropySource for FixedEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), AllocationError> {
        let mut blocks = self
            .blocks
            .lock()
            .map_err(|e| AllocationError::EntropyUnavailable(e.to_string()))?;

        let Some(block) = blocks.pop_front() else {
            return Err(AllocationError::EntropyUnavailable(
                "fixed entropy sequence exhausted".to_string(),
            ));
        };

        if block.len() < buf.len() {
            return Err(AllocationError::EntropyUnavailable(format!(
                "fixed entropy block too small: need {}, got {}",
                buf.len(),
                block.len()
            )));
        }

        buf.copy_from_slice(&block[..buf.len()]);
        Ok(())
    }
}
