//! Upstream API endpoints.

pub mod events;
pub mod reddit;

pub use events::EventsClient;
pub use reddit::RedditClient;
