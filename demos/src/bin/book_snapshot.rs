//! Print an aggregated order book snapshot for a product
//!
//! Run: cargo run --bin book_snapshot -- [--product BTC-USD]
//!        [--environment sandbox|production]

use gdax_auth::Credentials;
use gdax_rest::GdaxRestClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut product = "BTC-USD".to_string();
    let mut environment = "sandbox".to_string();
    let mut argv = std::env::args().skip(1);
    while let Some(flag) = argv.next() {
        let value = argv
            .next()
            .ok_or_else(|| format!("missing value for {}", flag))?;
        match flag.as_str() {
            "--product" => product = value,
            "--environment" => environment = value,
            other => return Err(format!("unknown flag: {}", other).into()),
        }
    }

    let client = match environment.as_str() {
        "production" => GdaxRestClient::production(Credentials::public()),
        "sandbox" => GdaxRestClient::sandbox(Credentials::public()),
        other => return Err(format!("unknown environment: {}", other).into()),
    };

    let book = client.get_product_order_book_level2(&product).await?;
    println!("{} book, sequence {}", product, book.sequence);

    println!("{:>14} {:>16} {:>8}", "ASK", "SIZE", "ORDERS");
    for ask in book.asks.iter().take(10).rev() {
        println!("{:>14} {:>16} {:>8}", ask.price, ask.size, ask.num_orders);
    }
    println!("{}", "-".repeat(40));
    for bid in book.bids.iter().take(10) {
        println!("{:>14} {:>16} {:>8}", bid.price, bid.size, bid.num_orders);
    }
    println!("{:>14} {:>16} {:>8}", "BID", "SIZE", "ORDERS");

    Ok(())
}
