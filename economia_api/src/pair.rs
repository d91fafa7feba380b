//! Currency pair identifiers as used by the `/json/last/{pair}` endpoint.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A `BASE-QUOTE` currency pair such as `USD-BRL`.
///
/// The API addresses a pair as `USD-BRL` in the URL and keys the
/// response object by the concatenated form `USDBRL`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    pub fn usd_brl() -> Self {
        Self {
            base: "USD".to_string(),
            quote: "BRL".to_string(),
        }
    }

    /// Key of this pair's object in the response body.
    pub fn response_key(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self::usd_brl()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::InvalidPair(s.to_string()))?;
        let valid = |code: &str| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphabetic());
        if !valid(base) || !valid(quote) {
            return Err(Error::InvalidPair(s.to_string()));
        }
        Ok(Self {
            base: base.to_ascii_uppercase(),
            quote: quote.to_ascii_uppercase(),
        })
    }
}
