use crate::domain::bin::BinRecord;
use crate::domain::ports::{BinCacheStore, UserDirectory};
use crate::domain::user::UserRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory BIN cache.
///
/// Records are kept in insertion order in an append-only `Vec`, so duplicate
/// `bin` values are retained exactly as a document store would keep them.
#[derive(Default, Clone)]
pub struct InMemoryBinStore {
    records: Arc<RwLock<Vec<BinRecord>>>,
}

impl InMemoryBinStore {
    /// Creates a new, empty in-memory BIN store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, duplicates included.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl BinCacheStore for InMemoryBinStore {
    async fn find_by_bin(&self, bin: &str) -> Result<Vec<BinRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.bin == bin).cloned().collect())
    }

    async fn append(&self, record: BinRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record);
        Ok(())
    }
}

/// A thread-safe in-memory user directory keyed by user id.
#[derive(Default, Clone)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserDirectory {
    /// Creates a new, empty user directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user.
    pub async fn insert(&self, user: UserRecord) {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }
}
