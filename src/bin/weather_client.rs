//! Asks the weather server for the temperature at each location given on the
//! command line (default: london).

use anyhow::{Context, Result};
use chrono::DateTime;
use rpc_weather_llm::{
    config,
    rpc::{self, ClientSettings},
    schema::WeatherRequest,
};
use tarpc::context;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load().await?;

    let mut locations: Vec<String> = std::env::args().skip(1).collect();
    if locations.is_empty() {
        locations.push("london".to_string());
    }

    let addr = config.weather_server.socket_addr()?;
    let client = rpc::connect_weather(addr, &ClientSettings::from(&config.rpc_client))
        .await
        .with_context(|| format!("Error opening connection to {addr}"))?;

    for location in locations {
        println!("\nGetting temperature for: {location}");
        match client
            .get_temperature(context::current(), WeatherRequest::new(location))
            .await
            .context("Error calling GetTemperature")?
        {
            Ok(reading) => {
                let observed = DateTime::from_timestamp(reading.timestamp, 0)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| reading.timestamp.to_string());
                println!(
                    "Temperature in {}: {:.1} {} (at {})",
                    reading.location, reading.temperature, reading.unit, observed
                );
            }
            Err(e) => println!("Weather service error: {} ({})", e.message, e.details),
        }
    }

    Ok(())
}
