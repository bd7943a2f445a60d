use super::bin::BinRecord;
use super::card::CardDetails;
use serde::Serialize;

const UNKNOWN: &str = "Unknown";

/// Sanitized result of a successful tokenization.
///
/// Carries only BIN prefixes, issuer metadata and the last four digits.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenizationResponse {
    pub success: bool,
    pub token: Option<String>,
    pub card_info: CardInfo,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub bin_short: String,
    pub bin_long: String,
    pub brand: String,
    pub bank: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub last4: String,
}

impl TokenizationResponse {
    pub fn assemble(card: &CardDetails, record: &BinRecord) -> Self {
        let bins = card.bins();
        Self {
            success: true,
            token: None,
            card_info: CardInfo {
                bin_short: bins.short,
                bin_long: bins.long,
                brand: or_unknown(record.brand.as_deref()),
                bank: or_unknown(record.issuer.as_deref()),
                card_type: or_unknown(record.card_type.as_deref()),
                last4: card.last4().to_string(),
            },
        }
    }
}

fn or_unknown(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}
