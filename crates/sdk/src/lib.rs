//! # Hearsay SDK
//!
//! Clients for the upstream APIs behind the Hearsay tools: the public Reddit
//! JSON endpoints and a basic-auth protected events directory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hearsay_sdk::{RedditClient, SdkResult};
//!
//! #[tokio::main]
//! async fn main() -> SdkResult<()> {
//!     let client = RedditClient::builder()
//!         .base_url("https://www.reddit.com")
//!         .user_agent("hearsay-example/0.1")
//!         .reddit()?;
//!
//!     let listing = client.hot_posts("rust", 5).await?;
//!     for post in &listing.data.children {
//!         println!("{} ({} upvotes)", post.data.title, post.data.ups);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Upcoming events
//!
//! ```rust,no_run
//! use hearsay_sdk::{EventFinder, EventsClient};
//!
//! # async fn example() -> hearsay_sdk::SdkResult<()> {
//! let client = EventsClient::builder()
//!     .base_url("https://api.eventfinda.co.nz/v2")
//!     .basic_auth("username", "password")
//!     .events()?;
//!
//! let upcoming = EventFinder::new(client).upcoming("Auckland").await?;
//! println!("{} events in {}", upcoming.events.len(), upcoming.location);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod finder;
pub mod transport;

pub use api::{EventsClient, RedditClient};
pub use client::ClientBuilder;
pub use config::ClientConfig;
pub use error::{SdkResult, UpstreamError};
pub use finder::{EventFinder, UpcomingEvents};

// Re-export core types for convenience
pub use hearsay_core::events::{Event, Location, Ticket, TicketInfo};
pub use hearsay_core::{
    Comment, CommentNode, PostAndComments, PostListing, SearchSort, TimeWindow, UserAbout,
};
