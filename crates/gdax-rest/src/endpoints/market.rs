//! Public market data endpoints
//!
//! These endpoints don't require authentication. They still go through the
//! signed pipeline; with empty credentials the auth headers are simply
//! absent.

use crate::client::GdaxRestClient;
use crate::error::RestResult;
use crate::types::{
    candles_from_raw, AggregatedLevel, BookEntry, Candle, Currency, Granularity, OrderBook,
    OrderLevel, Product, ProductStats, ProductTicker, RawOrderBook, ServerTime, Trade,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a GdaxRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(client: &'a GdaxRestClient) -> Self {
        Self { client }
    }

    /// Get the API server time
    #[instrument(skip(self))]
    pub async fn get_time(&self) -> RestResult<ServerTime> {
        debug!("Fetching server time");
        self.client.get("/time", &[]).await
    }

    /// List tradable products
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> RestResult<Vec<Product>> {
        debug!("Fetching products");
        self.client.get("/products", &[]).await
    }

    /// List known currencies
    #[instrument(skip(self))]
    pub async fn get_currencies(&self) -> RestResult<Vec<Currency>> {
        debug!("Fetching currencies");
        self.client.get("/currencies", &[]).await
    }

    /// Get 24-hour statistics for a product
    ///
    /// # Arguments
    /// * `product_id` - Product (e.g., "BTC-USD")
    #[instrument(skip(self))]
    pub async fn get_product_24hr_stats(&self, product_id: &str) -> RestResult<ProductStats> {
        let path = format!("/products/{}/stats", product_id);
        debug!("Fetching 24hr stats for {}", product_id);
        self.client.get(&path, &[]).await
    }

    /// Get the snapshot ticker for a product
    #[instrument(skip(self))]
    pub async fn get_product_ticker(&self, product_id: &str) -> RestResult<ProductTicker> {
        let path = format!("/products/{}/ticker", product_id);
        debug!("Fetching ticker for {}", product_id);
        self.client.get(&path, &[]).await
    }

    /// List recent trades for a product
    #[instrument(skip(self))]
    pub async fn get_product_trades(&self, product_id: &str) -> RestResult<Vec<Trade>> {
        let path = format!("/products/{}/trades", product_id);
        debug!("Fetching trades for {}", product_id);
        self.client.get(&path, &[]).await
    }

    /// Get the best bid/ask only
    #[instrument(skip(self))]
    pub async fn get_product_order_book_level1(
        &self,
        product_id: &str,
    ) -> RestResult<OrderBook<AggregatedLevel>> {
        self.order_book(product_id, "1").await
    }

    /// Get the top 50 aggregated levels
    #[instrument(skip(self))]
    pub async fn get_product_order_book_level2(
        &self,
        product_id: &str,
    ) -> RestResult<OrderBook<AggregatedLevel>> {
        self.order_book(product_id, "2").await
    }

    /// Get the full book, one entry per order
    ///
    /// The tuple shape matches levels 1/2 but the third element is an order
    /// id, so this decodes to [`OrderLevel`] entries.
    #[instrument(skip(self))]
    pub async fn get_product_order_book_level3(
        &self,
        product_id: &str,
    ) -> RestResult<OrderBook<OrderLevel>> {
        self.order_book(product_id, "3").await
    }

    /// The level decides the entry type at the call site; the payload is
    /// never sniffed.
    async fn order_book<L: BookEntry>(
        &self,
        product_id: &str,
        level: &str,
    ) -> RestResult<OrderBook<L>> {
        let path = format!("/products/{}/book", product_id);
        debug!("Fetching level {} book for {}", level, product_id);
        let raw: RawOrderBook = self.client.get(&path, &[("level", level)]).await?;
        OrderBook::from_raw(raw)
    }

    /// Get historic rates (candles) for a product
    ///
    /// # Arguments
    /// * `product_id` - Product (e.g., "BTC-USD")
    /// * `start` / `end` - Optional ISO 8601 time window bounds
    /// * `granularity` - Bucket width; a request parameter, not inferred
    #[instrument(skip(self, start, end))]
    pub async fn get_product_historic_rates(
        &self,
        product_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        granularity: Granularity,
    ) -> RestResult<Vec<Candle>> {
        let path = format!("/products/{}/candles", product_id);
        let granularity = granularity.as_secs().to_string();
        let start = start.map(format_timestamp);
        let end = end.map(format_timestamp);

        let mut query: Vec<(&str, &str)> = vec![("granularity", &granularity)];
        if let Some(start) = &start {
            query.push(("start", start));
        }
        if let Some(end) = &end {
            query.push(("end", end));
        }

        debug!("Fetching candles for {}", product_id);
        let raw: Vec<Vec<Value>> = self.client.get(&path, &query).await?;
        candles_from_raw(raw)
    }
}

fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_whole_seconds_utc() {
        let time = Utc.with_ymd_and_hms(2017, 7, 15, 14, 7, 0).unwrap();
        assert_eq!(format_timestamp(time), "2017-07-15T14:07:00Z");
    }
}
