use serde::{Deserialize, Serialize};

/// A single exchange-rate snapshot as returned by `/json/last/{pair}`.
///
/// Every field is kept as the string the API sends; nothing is parsed
/// into numbers or dates. Only `bid` is required; absent fields decode
/// as empty strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeQuote {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub codein: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub high: String,

    #[serde(default)]
    pub low: String,

    #[serde(default)]
    pub var_bid: String,

    #[serde(default)]
    pub pct_change: String,

    pub bid: String,

    #[serde(default)]
    pub ask: String,

    #[serde(default)]
    pub timestamp: String,

    #[serde(default, rename = "create_date")]
    pub create_date: String,
}
