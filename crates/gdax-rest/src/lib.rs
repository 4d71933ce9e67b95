//! REST API client for the GDAX cryptocurrency exchange
//!
//! This crate provides a typed client for GDAX's REST API: public market
//! data plus the authenticated account endpoints, all through one signed
//! request pipeline.
//!
//! # Features
//!
//! - **Market Data**: server time, products, currencies, 24h stats, ticker,
//!   trades, order books (levels 1-3), historic rates
//! - **Account**: report status, trailing volume
//!
//! # Authentication
//!
//! Requests are signed with HMAC-SHA256 over
//! `timestamp + method + request_path + body` using the base64-decoded API
//! secret, per GDAX's `CB-ACCESS-*` header scheme. A client built with
//! [`Credentials::public`] sends no auth headers and can still use every
//! public endpoint.
//!
//! # Example
//!
//! ```no_run
//! use gdax_rest::{Credentials, GdaxRestClient, Granularity};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GdaxRestClient::production(Credentials::public());
//!
//!     let book = client.get_product_order_book_level1("BTC-USD").await?;
//!     println!("best bid: {:?}", book.bids.first());
//!
//!     let candles = client
//!         .get_product_historic_rates("ETH-USD", None, None, Granularity::OneHour)
//!         .await?;
//!     println!("{} candles", candles.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, GdaxRestClient, PRODUCTION_URL, SANDBOX_URL};
pub use error::{RestError, RestResult};
pub use gdax_auth::Credentials;

// Re-export endpoint-specific types
pub use types::{
    // Market data
    AggregatedLevel, Candle, Currency, Granularity, OrderBook, OrderLevel, Product, ProductStats,
    ProductTicker, ServerTime, Side, Trade,
    // Account
    ReportStatus, TrailingVolume,
};
