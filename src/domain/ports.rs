use super::bin::{BinRecord, IssuerLookupResponse};
use super::user::UserRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Persistent cache of BIN records.
///
/// Equality lookups may return several records for one `bin`; nothing
/// enforces uniqueness.
#[async_trait]
pub trait BinCacheStore: Send + Sync {
    async fn find_by_bin(&self, bin: &str) -> Result<Vec<BinRecord>>;
    async fn append(&self, record: BinRecord) -> Result<()>;
}

/// Point lookup of users by caller identity.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>>;
}

/// Remote issuer metadata service, queried by short BIN.
#[async_trait]
pub trait IssuerLookup: Send + Sync {
    async fn lookup(&self, bin_short: &str) -> LookupResult;
}

/// Source of the PEM-encoded private decryption key.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn load_pem(&self) -> Result<String>;
}

/// Transport or decoding failure of the issuer lookup service.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(String),
    #[error("lookup service returned status {0}")]
    Status(u16),
    #[error("lookup response could not be decoded: {0}")]
    Decode(String),
}

pub type LookupResult = std::result::Result<IssuerLookupResponse, LookupError>;

pub type BinCacheStoreBox = Box<dyn BinCacheStore>;
pub type UserDirectoryBox = Box<dyn UserDirectory>;
pub type IssuerLookupBox = Box<dyn IssuerLookup>;
pub type KeySourceBox = Box<dyn KeySource>;
pub type BinCacheStoreFactory = Box<dyn Fn() -> BinCacheStoreBox + Send + Sync>;
