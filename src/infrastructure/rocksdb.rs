use crate::domain::bin::BinRecord;
use crate::domain::ports::{BinCacheStore, UserDirectory};
use crate::domain::user::UserRecord;
use crate::error::{Result, TokenizeError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Column Family for cached BIN records.
pub const CF_BIN_CODES: &str = "bin_codes";
/// Column Family for the user directory.
pub const CF_USERS: &str = "users";

const KEY_SEPARATOR: u8 = 0;

/// A persistent store implementation using RocksDB.
///
/// Serves both the BIN cache and the user directory from separate Column
/// Families. BIN records are keyed `bin \0 created_at_nanos sequence`, so an
/// equality query on `bin` is a prefix scan and an append never overwrites
/// an earlier record for the same BIN.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    sequence: Arc<AtomicU64>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("bin_codes" and "users") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_bins = ColumnFamilyDescriptor::new(CF_BIN_CODES, Options::default());
        let cf_users = ColumnFamilyDescriptor::new(CF_USERS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_bins, cf_users])?;

        Ok(Self {
            db: Arc::new(db),
            sequence: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Inserts or replaces a user record.
    pub fn put_user(&self, user: &UserRecord) -> Result<()> {
        let cf = self.cf(CF_USERS)?;
        let value = serde_json::to_vec(user).map_err(|e| {
            TokenizeError::internal(format!("Serialization error: {}", e))
        })?;
        self.db.put_cf(&cf, user.id.as_bytes(), value)?;
        Ok(())
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| TokenizeError::internal(format!("{} column family not found", name)))
    }

    fn bin_prefix(bin: &str) -> Vec<u8> {
        let mut prefix = bin.as_bytes().to_vec();
        prefix.push(KEY_SEPARATOR);
        prefix
    }
}

#[async_trait]
impl BinCacheStore for RocksDBStore {
    async fn find_by_bin(&self, bin: &str) -> Result<Vec<BinRecord>> {
        let cf = self.cf(CF_BIN_CODES)?;
        let prefix = Self::bin_prefix(bin);

        let mut records = Vec::new();
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(prefix.as_slice(), Direction::Forward));

        for item in iter {
            let (key, value) = item.map_err(|e| {
                TokenizeError::internal(format!("RocksDB iteration error: {}", e))
            })?;
            if !key.starts_with(prefix.as_slice()) {
                break;
            }
            let record: BinRecord = serde_json::from_slice(&value).map_err(|e| {
                TokenizeError::internal(format!("Failed to deserialize BIN record: {}", e))
            })?;
            records.push(record);
        }

        Ok(records)
    }

    async fn append(&self, record: BinRecord) -> Result<()> {
        let cf = self.cf(CF_BIN_CODES)?;

        let nanos = record.created_at.timestamp_nanos_opt().unwrap_or_default();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let mut key = Self::bin_prefix(&record.bin);
        key.extend_from_slice(format!("{:020}{:010}", nanos, seq).as_bytes());

        let value = serde_json::to_vec(&record).map_err(|e| {
            TokenizeError::internal(format!("Serialization error: {}", e))
        })?;

        self.db.put_cf(&cf, key, value)?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for RocksDBStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let cf = self.cf(CF_USERS)?;

        if let Some(bytes) = self.db.get_cf(&cf, user_id.as_bytes())? {
            let user = serde_json::from_slice(&bytes).map_err(|e| {
                TokenizeError::internal(format!("Deserialization error: {}", e))
            })?;
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
