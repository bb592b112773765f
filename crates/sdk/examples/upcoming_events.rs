//! Upcoming events example.
//!
//! Resolves a location and prints the next seven days of events as JSON.
//! Credentials come from EVENTS_API_USERNAME / EVENTS_API_PASSWORD.
//!
//! Run with: cargo run --example upcoming_events -- Auckland

use hearsay_core::AppConfig;
use hearsay_sdk::{EventFinder, EventsClient, SdkResult};

#[tokio::main]
async fn main() -> SdkResult<()> {
    tracing_subscriber::fmt::init();

    let location = std::env::args().nth(1).unwrap_or_else(|| "Auckland".to_string());

    let mut config = AppConfig::default();
    config.apply_env(|key| std::env::var(key).ok());

    let client = EventsClient::from_app_config(&config)?;
    let finder = EventFinder::new(client).with_concurrency(config.events.detail_concurrency);

    let upcoming = finder.upcoming(&location).await?;
    println!(
        "Events in {} from {} to {}:",
        upcoming.location, upcoming.start, upcoming.end
    );
    println!("{}", serde_json::to_string_pretty(&upcoming.events)?);

    Ok(())
}
