//! Raw API records and their normalized display form.
//!
//! The remote search API is untrusted: field names vary between deployments
//! (`symbol` or `ticker`, `exchange` or `market`) and any field may be
//! missing or carry a non-string value. [`RawRecord`] decodes leniently and
//! [`normalize`] maps it onto one canonical [`NormalizedRecord`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Exchange shown when a record names neither `exchange` nor `market`.
pub const DEFAULT_EXCHANGE: &str = "NYSE";

/// One record as returned by the search API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub symbol: Option<String>,
    pub ticker: Option<String>,
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub market: Option<String>,
}

impl RawRecord {
    /// Decode one array element.
    ///
    /// Fields are read one at a time, so a malformed or unexpected field only
    /// loses itself. Anything that is not an object becomes an empty record,
    /// which the display filter later drops.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from_fields(&fields),
            _ => Self::default(),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let field = |name: &str| fields.get(name).and_then(scalar_text);
        Self {
            symbol: field("symbol"),
            ticker: field("ticker"),
            name: field("name"),
            exchange: field("exchange"),
            market: field("market"),
        }
    }
}

/// Canonical `{symbol, name, exchange}` triple used for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: String,
}

impl NormalizedRecord {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: Some(name.into()),
            exchange: exchange.into(),
        }
    }
}

/// `symbol ?? ticker`, `name`, `exchange ?? market ?? "NYSE"`.
///
/// Only absent fields fall through; an empty `symbol` string is kept as is.
pub fn normalize(raw: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        symbol: raw
            .symbol
            .as_ref()
            .or(raw.ticker.as_ref())
            .cloned()
            .unwrap_or_default(),
        name: raw.name.clone(),
        exchange: raw
            .exchange
            .as_ref()
            .or(raw.market.as_ref())
            .cloned()
            .unwrap_or_else(|| String::from(DEFAULT_EXCHANGE)),
    }
}

pub fn is_displayable(record: &NormalizedRecord) -> bool {
    !record.symbol.is_empty()
}

/// Normalize and filter a record sequence, preserving input order.
pub fn displayable_records<'a, I>(records: I) -> Vec<NormalizedRecord>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records
        .into_iter()
        .map(normalize)
        .filter(is_displayable)
        .collect()
}

/// Strings pass through and other scalars are printed; null and containers are absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
