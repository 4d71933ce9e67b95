//! Types for GDAX REST API responses
//!
//! Flat response objects deserialize straight through serde. The positional
//! payloads (order book tuples, candle rows) arrive as raw
//! `Vec<serde_json::Value>` rows and are converted to typed values here,
//! failing closed with [`RestError::MalformedEntry`] on any shape mismatch.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{RestError, RestResult};

// ============================================================================
// Flat Response Types
// ============================================================================

/// API server time
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    /// ISO 8601 timestamp
    pub iso: DateTime<Utc>,
    /// Seconds since epoch, with fractional part
    pub epoch: f64,
}

/// A tradable product (currency pair)
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Product identifier (e.g., "BTC-USD")
    pub id: String,
    /// Base currency code
    pub base_currency: String,
    /// Quote currency code
    pub quote_currency: String,
    /// Minimum order size in base currency
    #[serde(with = "rust_decimal::serde::str")]
    pub base_min_size: Decimal,
    /// Maximum order size in base currency
    #[serde(with = "rust_decimal::serde::str")]
    pub base_max_size: Decimal,
    /// Smallest price increment in quote currency
    #[serde(with = "rust_decimal::serde::str")]
    pub quote_increment: Decimal,
}

/// A listed currency
#[derive(Debug, Clone, Deserialize)]
pub struct Currency {
    /// Currency code (e.g., "BTC")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Smallest transactable unit
    #[serde(with = "rust_decimal::serde::str")]
    pub min_size: Decimal,
}

/// 24-hour statistics for a product
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductStats {
    #[serde(with = "rust_decimal::serde::str")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub last: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume_30day: Decimal,
}

/// Snapshot ticker: last trade plus best bid/ask
#[derive(Debug, Clone, Deserialize)]
pub struct ProductTicker {
    pub trade_id: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub bid: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ask: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    pub time: DateTime<Utc>,
}

/// Side of a trade (taker side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// An executed trade
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub time: DateTime<Utc>,
    pub trade_id: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    pub side: Side,
}

// ============================================================================
// Order Book
// ============================================================================

/// Aggregated price level (order book levels 1 and 2)
///
/// Wire shape: `["price", "size", num_orders]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedLevel {
    pub price: Decimal,
    pub size: Decimal,
    /// Number of orders aggregated at this price
    pub num_orders: u64,
}

/// Per-order price level (order book level 3)
///
/// Wire shape: `["price", "size", "order-id"]`. Same arity as the
/// aggregated levels, but the third element is an order id string. Which
/// variant applies is decided by the endpoint that was called, never by
/// inspecting the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLevel {
    pub price: Decimal,
    pub size: Decimal,
    pub order_id: String,
}

/// Conversion from one raw `[price, size, _]` tuple
pub trait BookEntry: Sized {
    /// Convert a raw tuple, describing the defect on failure
    fn from_tuple(tuple: &[Value]) -> Result<Self, String>;
}

impl BookEntry for AggregatedLevel {
    fn from_tuple(tuple: &[Value]) -> Result<Self, String> {
        check_arity(tuple, 3)?;
        Ok(Self {
            price: decimal_string(&tuple[0]).ok_or("price is not a decimal string")?,
            size: decimal_string(&tuple[1]).ok_or("size is not a decimal string")?,
            num_orders: tuple[2]
                .as_u64()
                .ok_or("order count is not an unsigned integer")?,
        })
    }
}

impl BookEntry for OrderLevel {
    fn from_tuple(tuple: &[Value]) -> Result<Self, String> {
        check_arity(tuple, 3)?;
        Ok(Self {
            price: decimal_string(&tuple[0]).ok_or("price is not a decimal string")?,
            size: decimal_string(&tuple[1]).ok_or("size is not a decimal string")?,
            order_id: tuple[2]
                .as_str()
                .ok_or("order id is not a string")?
                .to_string(),
        })
    }
}

/// Order book payload before tuple conversion
#[derive(Debug, Deserialize)]
pub(crate) struct RawOrderBook {
    pub sequence: u64,
    pub bids: Vec<Vec<Value>>,
    pub asks: Vec<Vec<Value>>,
}

/// Order book snapshot at a given depth
///
/// Bids and asks keep the server's ordering (best price first is a server
/// contract; nothing is re-sorted here).
#[derive(Debug, Clone)]
pub struct OrderBook<L> {
    pub sequence: u64,
    pub bids: Vec<L>,
    pub asks: Vec<L>,
}

impl<L: BookEntry> OrderBook<L> {
    pub(crate) fn from_raw(raw: RawOrderBook) -> RestResult<Self> {
        Ok(Self {
            sequence: raw.sequence,
            bids: convert_side("bid", &raw.bids)?,
            asks: convert_side("ask", &raw.asks)?,
        })
    }
}

fn convert_side<L: BookEntry>(kind: &'static str, rows: &[Vec<Value>]) -> RestResult<Vec<L>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            L::from_tuple(row).map_err(|reason| RestError::MalformedEntry { kind, index, reason })
        })
        .collect()
}

// ============================================================================
// Historic Rates
// ============================================================================

/// Time bucket width for historic rate requests
///
/// A request parameter only; the response does not carry it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    SixHours,
    OneDay,
}

impl Granularity {
    /// Bucket width in seconds, as the API expects it
    pub fn as_secs(self) -> u64 {
        match self {
            Self::OneMinute => 60,
            Self::FiveMinutes => 300,
            Self::FifteenMinutes => 900,
            Self::OneHour => 3600,
            Self::SixHours => 21600,
            Self::OneDay => 86400,
        }
    }

    /// Parse a seconds value into a supported granularity
    pub fn from_secs(secs: u64) -> Option<Self> {
        match secs {
            60 => Some(Self::OneMinute),
            300 => Some(Self::FiveMinutes),
            900 => Some(Self::FifteenMinutes),
            3600 => Some(Self::OneHour),
            21600 => Some(Self::SixHours),
            86400 => Some(Self::OneDay),
            _ => None,
        }
    }
}

/// One OHLCV time bucket
///
/// Wire shape: `[time, low, high, open, close, volume]` with epoch-second
/// time. Row order is preserved as served (typically newest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candle {
    /// Bucket start time
    pub time: DateTime<Utc>,
    pub low: Decimal,
    pub high: Decimal,
    pub open: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    fn from_row(row: &[Value]) -> Result<Self, String> {
        check_arity(row, 6)?;
        let secs = row[0].as_i64().ok_or("time is not an integer")?;
        let time = Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or("time is out of range")?;
        Ok(Self {
            time,
            low: decimal_number(&row[1])?,
            high: decimal_number(&row[2])?,
            open: decimal_number(&row[3])?,
            close: decimal_number(&row[4])?,
            volume: decimal_number(&row[5])?,
        })
    }
}

pub(crate) fn candles_from_raw(rows: Vec<Vec<Value>>) -> RestResult<Vec<Candle>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            Candle::from_row(row).map_err(|reason| RestError::MalformedEntry {
                kind: "candle",
                index,
                reason,
            })
        })
        .collect()
}

// ============================================================================
// Account Types
// ============================================================================

/// Status of a previously requested account report
#[derive(Debug, Clone, Deserialize)]
pub struct ReportStatus {
    pub id: String,
    #[serde(rename = "type")]
    pub report_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub file_url: Option<String>,
}

/// 30-day trailing volume for one product
#[derive(Debug, Clone, Deserialize)]
pub struct TrailingVolume {
    pub product_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub exchange_volume: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    pub recorded_at: DateTime<Utc>,
}

// ============================================================================
// Positional decode helpers
// ============================================================================

fn check_arity(row: &[Value], expected: usize) -> Result<(), String> {
    if row.len() != expected {
        return Err(format!("expected {} elements, got {}", expected, row.len()));
    }
    Ok(())
}

fn decimal_string(value: &Value) -> Option<Decimal> {
    value.as_str().and_then(|s| s.parse().ok())
}

/// JSON numbers go through their exact decimal rendering so precision
/// survives; scientific notation falls back through f64.
fn decimal_number(value: &Value) -> Result<Decimal, String> {
    use rust_decimal::prelude::FromPrimitive;

    let number = match value {
        Value::Number(n) => n,
        other => return Err(format!("expected a number, got {}", other)),
    };
    let rendered = number.to_string();
    if rendered.contains('e') || rendered.contains('E') {
        let float = number.as_f64().ok_or("number is not representable")?;
        Decimal::from_f64(float).ok_or_else(|| format!("{} does not fit a decimal", rendered))
    } else {
        rendered
            .parse()
            .map_err(|_| format!("{} does not fit a decimal", rendered))
    }
}
