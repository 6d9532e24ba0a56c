use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use jiff::Timestamp;
use keyhole_core::store::Result;
use keyhole_core::{InsertOutcome, LinkMapping, LinkStore, ShortCode};

/// In-memory storage entry for a link mapping.
#[derive(Debug, Clone)]
struct Entry {
    long_url: String,
    created_at: Timestamp,
}

impl Entry {
    fn into_mapping(self, code: &str) -> LinkMapping {
        LinkMapping {
            short_code: ShortCode::new_unchecked(code),
            long_url: self.long_url,
            created_at: self.created_at,
        }
    }
}

/// In-memory implementation of the `LinkStore` trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. The vacant-entry insert holds the shard
/// lock, which is what makes `insert_if_absent` atomic here.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    links: DashMap<String, Entry>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl LinkStore for InMemoryStore {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<LinkMapping>> {
        let Some(entry) = self.links.get(code.as_str()) else {
            return Ok(None);
        };

        Ok(Some(entry.clone().into_mapping(code.as_str())))
    }

    async fn find_by_url(&self, long_url: &str) -> Result<Option<LinkMapping>> {
        // Full scan; the MySQL store answers this from an index instead.
        // Oldest wins, with the code as tie-breaker, so the answer is stable.
        let mut oldest: Option<LinkMapping> = None;

        for item in self.links.iter() {
            if item.value().long_url != long_url {
                continue;
            }

            let candidate = item.value().clone().into_mapping(item.key());
            let replace = oldest.as_ref().is_none_or(|best| {
                (candidate.created_at, candidate.short_code.as_str())
                    < (best.created_at, best.short_code.as_str())
            });
            if replace {
                oldest = Some(candidate);
            }
        }

        Ok(oldest)
    }

    async fn insert_if_absent(&self, code: &ShortCode, long_url: &str) -> Result<InsertOutcome> {
        match self.links.entry(code.as_str().to_owned()) {
            MapEntry::Occupied(_) => Ok(InsertOutcome::Conflict),
            MapEntry::Vacant(slot) => {
                let entry = Entry {
                    long_url: long_url.to_owned(),
                    created_at: Timestamp::now(),
                };
                let mapping = entry.clone().into_mapping(code.as_str());
                slot.insert(entry);
                Ok(InsertOutcome::Created(mapping))
            }
        }
    }
}
