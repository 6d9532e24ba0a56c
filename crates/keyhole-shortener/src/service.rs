use crate::config::ShortenerConfig;
use async_trait::async_trait;
use keyhole_allocator::CodeAllocator;
use keyhole_core::{
    InsertOutcome, LinkMapping, LinkStore, ShortCode, ShortenError, Shortener,
};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// Wraps a `LinkStore` and a `CodeAllocator` and implements the
/// resolution algorithm:
/// - deduplicating strategies short-circuit to an existing mapping for
///   the same URL before any insert;
/// - each insert is conditional on the code being free, and a conflict
///   with a *different* URL triggers a re-proposal, bounded by
///   `max_attempts`. A conflict is never silently resolved to the other
///   URL's mapping.
#[derive(Debug, Clone)]
pub struct LinkService<S, A> {
    store: Arc<S>,
    allocator: Arc<A>,
    max_attempts: u32,
}

impl<S: LinkStore, A: CodeAllocator> LinkService<S, A> {
    /// Creates a new `LinkService`.
    pub fn new(store: S, allocator: A, config: ShortenerConfig) -> Self {
        Self {
            store: Arc::new(store),
            allocator: Arc::new(allocator),
            max_attempts: config.max_attempts,
        }
    }

    /// Validates that the URL has an http(s) scheme and a host.
    fn validate_url(url: &str) -> Result<(), ShortenError> {
        if url.is_empty() {
            return Err(ShortenError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(ShortenError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        };

        if rest.is_empty() {
            return Err(ShortenError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        }

        let scheme = scheme.to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ShortenError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                scheme
            )));
        }

        Ok(())
    }

    /// Handles an insert conflict for a deduplicating strategy.
    ///
    /// Between the `find_by_url` miss and the insert, a concurrent writer
    /// may have persisted the *same* URL under the proposed code. Only in
    /// that case is the existing mapping the correct answer; a different
    /// URL holding the code is a true collision.
    async fn existing_mapping_for_url(
        &self,
        code: &ShortCode,
        long_url: &str,
    ) -> Result<Option<LinkMapping>, ShortenError> {
        if !self.allocator.deduplicates_by_url() {
            return Ok(None);
        }

        let existing = self.store.find_by_code(code).await?;
        Ok(existing.filter(|mapping| mapping.long_url == long_url))
    }
}

#[async_trait]
impl<S: LinkStore, A: CodeAllocator> Shortener for LinkService<S, A> {
    async fn add_url(&self, long_url: &str) -> Result<LinkMapping, ShortenError> {
        Self::validate_url(long_url)?;

        if self.allocator.deduplicates_by_url() {
            if let Some(existing) = self.store.find_by_url(long_url).await? {
                debug!(code = %existing.short_code, "url already shortened");
                return Ok(existing);
            }
        }

        for attempt in 0..self.max_attempts {
            let code = self.allocator.propose(long_url, attempt)?;

            match self.store.insert_if_absent(&code, long_url).await? {
                InsertOutcome::Created(mapping) => {
                    debug!(code = %mapping.short_code, attempt, "created mapping");
                    return Ok(mapping);
                }
                InsertOutcome::Conflict => {
                    if let Some(existing) = self.existing_mapping_for_url(&code, long_url).await? {
                        debug!(code = %existing.short_code, "lost insert race for the same url");
                        return Ok(existing);
                    }
                    warn!(code = %code, attempt, "short code collision, retrying");
                }
            }
        }

        Err(ShortenError::AttemptsExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn get_url(&self, code: &ShortCode) -> Result<Option<LinkMapping>, ShortenError> {
        trace!(code = %code, "resolving short code");
        Ok(self.store.find_by_code(code).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyhole_allocator::{DigestAllocator, FixedEntropy, RandomAllocator};
    use keyhole_core::store::Result as StoreResult;
    use keyhole_core::AllocationError;
    use keyhole_storage::InMemoryStore;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn config(max_attempts: u32) -> ShortenerConfig {
        ShortenerConfig::builder().max_attempts(max_attempts).build()
    }

    /// Proposes codes from a fixed script, one per call.
    struct ScriptedAllocator {
        codes: Mutex<VecDeque<String>>,
    }

    impl ScriptedAllocator {
        fn new(codes: impl IntoIterator<Item = &'static str>) -> Self {
            Self {
                codes: Mutex::new(codes.into_iter().map(String::from).collect()),
            }
        }
    }

    impl CodeAllocator for ScriptedAllocator {
        fn propose(&self, _long_url: &str, _attempt: u32) -> Result<ShortCode, AllocationError> {
            let mut codes = self.codes.lock().unwrap();
            codes
                .pop_front()
                .map(ShortCode::new_unchecked)
                .ok_or_else(|| {
                    AllocationError::EntropyUnavailable("script exhausted".to_string())
                })
        }
    }

    /// Forwards to an `InMemoryStore` but never answers `find_by_url`,
    /// so the dedup short-circuit always misses and the conflict branch
    /// is reachable even for a deduplicating allocator.
    struct UrlBlindStore(InMemoryStore);

    #[async_trait]
    impl LinkStore for UrlBlindStore {
        async fn find_by_code(&self, code: &ShortCode) -> StoreResult<Option<LinkMapping>> {
            self.0.find_by_code(code).await
        }

        async fn find_by_url(&self, _long_url: &str) -> StoreResult<Option<LinkMapping>> {
            Ok(None)
        }

        async fn insert_if_absent(
            &self,
            code: &ShortCode,
            long_url: &str,
        ) -> StoreResult<InsertOutcome> {
            self.0.insert_if_absent(code, long_url).await
        }
    }

    #[tokio::test]
    async fn add_then_get_round_trip() {
        let service = LinkService::new(
            InMemoryStore::new(),
            RandomAllocator::new(6),
            ShortenerConfig::default(),
        );

        let mapping = service.add_url("https://example.com/a").await.unwrap();
        assert_eq!(mapping.long_url, "https://example.com/a");
        assert_eq!(mapping.short_code.as_str().len(), 6);

        let resolved = service.get_url(&mapping.short_code).await.unwrap().unwrap();
        assert_eq!(resolved.long_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn get_unknown_code_is_absent_not_error() {
        let service = LinkService::new(
            InMemoryStore::new(),
            RandomAllocator::new(6),
            ShortenerConfig::default(),
        );

        let result = service
            .get_url(&ShortCode::new_unchecked("unknown"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn digest_strategy_is_idempotent() {
        let service = LinkService::new(
            InMemoryStore::new(),
            DigestAllocator::new(6),
            ShortenerConfig::default(),
        );

        let first = service.add_url("https://example.com").await.unwrap();
        let second = service.add_url("https://example.com").await.unwrap();

        assert_eq!(first.short_code, second.short_code);
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn random_strategy_allows_duplicate_urls() {
        let entropy = FixedEntropy::new([vec![0x01; 6], vec![0x02; 6]]);
        let service = LinkService::new(
            InMemoryStore::new(),
            RandomAllocator::with_entropy(6, entropy),
            ShortenerConfig::default(),
        );

        let first = service.add_url("https://example.com").await.unwrap();
        let second = service.add_url("https://example.com").await.unwrap();

        assert_ne!(first.short_code, second.short_code);
    }

    #[tokio::test]
    async fn collision_with_different_url_retries_to_fresh_code() {
        let store = InMemoryStore::new();
        store
            .insert_if_absent(&ShortCode::new_unchecked("abc123"), "https://a.example")
            .await
            .unwrap();

        let service = LinkService::new(
            store,
            ScriptedAllocator::new(["abc123", "xyz789"]),
            ShortenerConfig::default(),
        );

        let mapping = service.add_url("https://b.example").await.unwrap();

        // Must never resolve to A's pre-existing mapping.
        assert_eq!(mapping.short_code.as_str(), "xyz789");
        assert_eq!(mapping.long_url, "https://b.example");

        let original = service
            .get_url(&ShortCode::new_unchecked("abc123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(original.long_url, "https://a.example");
    }

    #[tokio::test]
    async fn exhausted_attempts_fail_without_creating_a_record() {
        let store = InMemoryStore::new();
        for code in ["col-01", "col-02", "col-03"] {
            store
                .insert_if_absent(&ShortCode::new_unchecked(code), "https://other.example")
                .await
                .unwrap();
        }

        let service = LinkService::new(
            store,
            ScriptedAllocator::new(["col-01", "col-02", "col-03"]),
            config(3),
        );

        let err = service.add_url("https://b.example").await.unwrap_err();
        assert!(matches!(
            err,
            ShortenError::AttemptsExhausted { attempts: 3 }
        ));

        // Every proposed code still belongs to the pre-existing URL; no
        // record was created for the failed request.
        for code in ["col-01", "col-02", "col-03"] {
            let mapping = service
                .get_url(&ShortCode::new_unchecked(code))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(mapping.long_url, "https://other.example");
        }
    }

    /// Scripted allocator that claims to deduplicate by URL, standing in
    /// for the deterministic strategy on the conflict path.
    struct DedupScripted(ScriptedAllocator);

    impl CodeAllocator for DedupScripted {
        fn propose(&self, long_url: &str, attempt: u32) -> Result<ShortCode, AllocationError> {
            self.0.propose(long_url, attempt)
        }

        fn deduplicates_by_url(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn conflict_with_same_url_returns_existing_mapping() {
        // Simulates losing the insert race to a writer of the same URL:
        // the dedup lookup misses, the insert conflicts, and the
        // conflicting row turns out to be ours.
        let store = UrlBlindStore(InMemoryStore::new());
        store
            .insert_if_absent(&ShortCode::new_unchecked("raced1"), "https://example.com")
            .await
            .unwrap();

        let service = LinkService::new(
            store,
            DedupScripted(ScriptedAllocator::new(["raced1"])),
            ShortenerConfig::default(),
        );

        let mapping = service.add_url("https://example.com").await.unwrap();
        assert_eq!(mapping.short_code.as_str(), "raced1");
        assert_eq!(mapping.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn invalid_urls_are_rejected() {
        let service = LinkService::new(
            InMemoryStore::new(),
            RandomAllocator::new(6),
            ShortenerConfig::default(),
        );

        for url in ["", "not-a-valid-url", "ftp://example.com", "https://"] {
            let err = service.add_url(url).await.unwrap_err();
            assert!(matches!(err, ShortenError::InvalidUrl(_)), "url: {url:?}");
        }
    }

    #[tokio::test]
    async fn entropy_failure_surfaces_as_allocation_error() {
        let service = LinkService::new(
            InMemoryStore::new(),
            RandomAllocator::with_entropy(6, FixedEntropy::default()),
            ShortenerConfig::default(),
        );

        let err = service.add_url("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenError::Allocation(_)));
    }

    #[tokio::test]
    async fn concurrent_adds_of_same_url_with_digest_create_one_record() {
        use std::sync::Arc;

        let service = Arc::new(LinkService::new(
            InMemoryStore::new(),
            DigestAllocator::new(6),
            ShortenerConfig::default(),
        ));

        let mut handles = vec![];
        for _ in 0..8 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.add_url("https://example.com").await.unwrap()
            }));
        }

        let mut codes = vec![];
        for handle in handles {
            codes.push(handle.await.unwrap().short_code);
        }

        codes.dedup();
        assert_eq!(codes.len(), 1);
    }
}
