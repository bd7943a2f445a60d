use crate::error::TokenizeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issuer metadata cached per BIN prefix.
///
/// Records are append-only: the resolver never updates or deletes them, and
/// the store may hold several records for the same `bin`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BinRecord {
    pub bin: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default, rename = "type")]
    pub card_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BinRecord {
    /// Maps a remote lookup answer onto a cache record tagged with `bin`.
    pub fn from_lookup(
        bin: &str,
        response: IssuerLookupResponse,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            bin: bin.to_string(),
            brand: response.card,
            country: response.country,
            country_code: response.country_code,
            issuer: response.bank,
            product: response.level.clone(),
            level: response.level,
            card_type: response.card_type,
            created_at,
        }
    }
}

/// Body returned by the external issuer lookup service.
///
/// Every field arrives as a string; the answer carries data only when
/// `valid` is exactly `"true"`.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct IssuerLookupResponse {
    #[serde(default)]
    pub valid: Option<String>,
    #[serde(default)]
    pub card: Option<String>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, rename = "type")]
    pub card_type: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl IssuerLookupResponse {
    pub fn is_valid(&self) -> bool {
        self.valid.as_deref() == Some("true")
    }
}

/// Outcome of resolving issuer metadata for a card.
#[derive(Debug, PartialEq, Clone)]
pub enum BinResolution {
    Resolved(BinRecord),
    Unresolved(String),
}

/// Outcome of the best-effort cache write-back.
#[derive(Debug)]
pub enum CacheWrite {
    Persisted,
    Failed(TokenizeError),
}
