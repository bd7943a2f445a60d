use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Card fields recovered from a decrypted request payload.
///
/// Lives only for the duration of one request and is wiped on drop. `Debug`
/// masks the number and redacts the security code so the struct is safe to
/// appear in logs.
#[derive(Clone, PartialEq, Default, Zeroize, ZeroizeOnDrop)]
pub struct CardDetails {
    pub name_on_card: String,
    pub color: String,
    pub number: String,
    pub valid_thru: String,
    pub cvv: String,
}

impl CardDetails {
    /// BIN prefixes used as cache and lookup keys.
    pub fn bins(&self) -> BinKeyPair {
        BinKeyPair::from_number(&self.number)
    }

    /// Last four characters of the number as submitted.
    pub fn last4(&self) -> &str {
        let start = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        &self.number[start..]
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("name_on_card", &self.name_on_card)
            .field("color", &self.color)
            .field("number", &format_args!("****{}", self.last4()))
            .field("valid_thru", &self.valid_thru)
            .field("cvv", &"***")
            .finish()
    }
}

/// Short (6 digit) and long (8 digit) BIN prefixes of a card number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinKeyPair {
    pub short: String,
    pub long: String,
}

impl BinKeyPair {
    pub const SHORT_LEN: usize = 6;
    pub const LONG_LEN: usize = 8;

    /// Strips non-digit characters, then takes up to 6 and 8 leading digits.
    pub fn from_number(number: &str) -> Self {
        let digits: String = number
            .chars()
            .filter(char::is_ascii_digit)
            .take(Self::LONG_LEN)
            .collect();
        let short = digits.chars().take(Self::SHORT_LEN).collect();

        Self {
            short,
            long: digits,
        }
    }
}
