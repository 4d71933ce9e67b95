//! Fetch historic rates (candles) for a product
//!
//! Run: cargo run --bin historic_rates -- [--product ETH-USD]
//!        [--start 2017-07-15T00:00:00Z] [--end 2017-07-15T01:00:00Z]
//!        [--granularity 60] [--environment sandbox|production]

use chrono::{DateTime, Duration, Utc};
use gdax_auth::Credentials;
use gdax_rest::{GdaxRestClient, Granularity};
use tracing_subscriber::EnvFilter;

struct Args {
    product: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    granularity: Granularity,
    environment: String,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        product: "ETH-USD".to_string(),
        start: Utc::now() - Duration::hours(1),
        end: Utc::now(),
        granularity: Granularity::OneMinute,
        environment: "sandbox".to_string(),
    };

    let mut argv = std::env::args().skip(1);
    while let Some(flag) = argv.next() {
        let value = argv
            .next()
            .ok_or_else(|| format!("missing value for {}", flag))?;
        match flag.as_str() {
            "--product" => args.product = value,
            "--start" => {
                args.start = value
                    .parse()
                    .map_err(|e| format!("invalid --start: {}", e))?;
            }
            "--end" => {
                args.end = value.parse().map_err(|e| format!("invalid --end: {}", e))?;
            }
            "--granularity" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|e| format!("invalid --granularity: {}", e))?;
                args.granularity = Granularity::from_secs(secs)
                    .ok_or_else(|| format!("unsupported granularity: {}s", secs))?;
            }
            "--environment" => args.environment = value,
            other => return Err(format!("unknown flag: {}", other)),
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args()?;
    println!(
        "fetching {} candles, {} .. {}, every {}s ({})",
        args.product,
        args.start,
        args.end,
        args.granularity.as_secs(),
        args.environment
    );

    let client = match args.environment.as_str() {
        "production" => GdaxRestClient::production(Credentials::public()),
        "sandbox" => GdaxRestClient::sandbox(Credentials::public()),
        other => return Err(format!("unknown environment: {}", other).into()),
    };

    let candles = client
        .get_product_historic_rates(
            &args.product,
            Some(args.start),
            Some(args.end),
            args.granularity,
        )
        .await?;

    println!(
        "{:<22} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "TIME", "LOW", "HIGH", "OPEN", "CLOSE", "VOLUME"
    );
    for candle in &candles {
        println!(
            "{:<22} {:>12} {:>12} {:>12} {:>12} {:>14}",
            candle.time.to_rfc3339(),
            candle.low,
            candle.high,
            candle.open,
            candle.close,
            candle.volume
        );
    }
    println!("{} candles", candles.len());

    Ok(())
}
