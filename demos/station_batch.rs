//! Fetches a week of hourly water levels and the daily extrema for a few
//! New England stations and prints the combined tables.
//!
//! Run with `RUST_LOG=info` to see the dispatcher's progress.

use coops_tides::{Datum, Interval, ProductKind, StationId, Tides, TidesConfig, TidesError};
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), TidesError> {
    env_logger::init();
    configure_polars_display();

    let config = TidesConfig::builder()
        .application("station_batch_demo")
        .concurrency(4)
        .request_timeout(Duration::from_secs(30))
        .build();
    let tides = Tides::with_config(config)?;

    let stations: Vec<StationId> = [8454000u32, 8452660, 8447930, 8449130, 8461490]
        .into_iter()
        .map(StationId::from)
        .collect();

    let levels = tides
        .get_data()
        .stations(&stations)
        .begin_date("20240301")
        .end_date("20240307 23:59")
        .product(ProductKind::WaterLevel)
        .datum(Datum::Mllw)
        .interval(Interval::Hourly)
        .call()
        .await?;

    println!("{} hourly water levels", levels.len());
    for skipped in levels.skipped() {
        println!("skipped {}: {}", skipped.station, skipped.reason);
    }
    println!("{}", levels.to_frame()?.collect()?);

    let extrema = tides
        .get_frame()
        .stations(&stations)
        .begin_date("03/01/2024")
        .end_date("03/07/2024")
        .product(ProductKind::HighLow)
        .datum(Datum::Mllw)
        .call()
        .await?
        .station("8454000")
        .collect()?;

    println!("{}", extrema);

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
