use crate::domain::bin::{BinRecord, BinResolution, CacheWrite};
use crate::domain::card::BinKeyPair;
use crate::domain::ports::{BinCacheStoreBox, IssuerLookupBox};
use chrono::Utc;
use tracing::{debug, info, warn};

pub const BIN_NOT_RECOGNIZED: &str = "BIN not recognized, unsupported card";

/// Cache-aside resolution of issuer metadata.
///
/// The cache is queried by the 8-digit BIN; on a miss the remote service is
/// asked once for the 6-digit BIN and a valid answer is written back tagged
/// with that 6-digit BIN. Duplicate cache records are tolerated by taking the
/// first match.
pub struct BinResolver {
    store: BinCacheStoreBox,
    lookup: IssuerLookupBox,
}

impl BinResolver {
    pub fn new(store: BinCacheStoreBox, lookup: IssuerLookupBox) -> Self {
        Self { store, lookup }
    }

    pub async fn resolve(&self, card_number: &str) -> BinResolution {
        let bins = BinKeyPair::from_number(card_number);

        if let Some(record) = self.cached(&bins.long).await {
            debug!(bin = %bins.long, "BIN resolved from cache");
            return BinResolution::Resolved(record);
        }

        let response = match self.lookup.lookup(&bins.short).await {
            Ok(response) if response.is_valid() => response,
            Ok(_) => {
                info!(bin = %bins.short, "issuer lookup returned no data");
                return BinResolution::Unresolved(BIN_NOT_RECOGNIZED.to_string());
            }
            Err(e) => {
                warn!(bin = %bins.short, error = %e, "issuer lookup failed");
                return BinResolution::Unresolved(BIN_NOT_RECOGNIZED.to_string());
            }
        };

        let record = BinRecord::from_lookup(&bins.short, response, Utc::now());
        if let CacheWrite::Failed(e) = self.write_back(record.clone()).await {
            warn!(bin = %record.bin, error = %e, "failed to cache BIN record");
        }

        BinResolution::Resolved(record)
    }

    /// Appends `record` to the cache, reporting rather than raising a failure.
    pub async fn write_back(&self, record: BinRecord) -> CacheWrite {
        match self.store.append(record).await {
            Ok(()) => CacheWrite::Persisted,
            Err(e) => CacheWrite::Failed(e),
        }
    }

    // A failing store query counts as a miss.
    async fn cached(&self, bin_long: &str) -> Option<BinRecord> {
        match self.store.find_by_bin(bin_long).await {
            Ok(records) => records.into_iter().next(),
            Err(e) => {
                warn!(bin = %bin_long, error = %e, "BIN cache query failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bin::IssuerLookupResponse;
    use crate::domain::ports::{BinCacheStore, IssuerLookup, LookupResult};
    use crate::error::{Result, TokenizeError};
    use crate::infrastructure::in_memory::InMemoryBinStore;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct StubLookup {
        calls: Arc<AtomicUsize>,
        valid: bool,
    }

    #[async_trait]
    impl IssuerLookup for StubLookup {
        async fn lookup(&self, _bin: &str) -> LookupResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(IssuerLookupResponse {
                valid: Some(if self.valid { "true" } else { "false" }.to_string()),
                card: Some("VISA".to_string()),
                ..Default::default()
            })
        }
    }

    struct FailingStore;

    #[async_trait]
    impl BinCacheStore for FailingStore {
        async fn find_by_bin(&self, _bin: &str) -> Result<Vec<BinRecord>> {
            Err(TokenizeError::internal("store offline"))
        }

        async fn append(&self, _record: BinRecord) -> Result<()> {
            Err(TokenizeError::internal("store offline"))
        }
    }

    #[tokio::test]
    async fn test_store_failures_do_not_fail_resolution() {
        let lookup = StubLookup {
            valid: true,
            ..Default::default()
        };
        let resolver = BinResolver::new(Box::new(FailingStore), Box::new(lookup.clone()));

        let resolution = resolver.resolve("4111111111111111").await;

        assert!(matches!(resolution, BinResolution::Resolved(r) if r.bin == "411111"));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_write_back_reports_failure() {
        let resolver = BinResolver::new(Box::new(FailingStore), Box::new(StubLookup::default()));
        let record = BinRecord::from_lookup("411111", IssuerLookupResponse::default(), Utc::now());

        assert!(matches!(resolver.write_back(record).await, CacheWrite::Failed(_)));
    }

    #[tokio::test]
    async fn test_write_back_persists() {
        let store = InMemoryBinStore::new();
        let resolver = BinResolver::new(Box::new(store.clone()), Box::new(StubLookup::default()));
        let record = BinRecord::from_lookup("411111", IssuerLookupResponse::default(), Utc::now());

        assert!(matches!(resolver.write_back(record).await, CacheWrite::Persisted));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_answer_is_unresolved() {
        let resolver = BinResolver::new(
            Box::new(InMemoryBinStore::new()),
            Box::new(StubLookup::default()),
        );

        assert_eq!(
            resolver.resolve("4111111111111111").await,
            BinResolution::Unresolved(BIN_NOT_RECOGNIZED.to_string())
        );
    }
}
