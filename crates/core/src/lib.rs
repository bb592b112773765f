// Core types and formatting for the Hearsay tool adapters

pub mod comments;
pub mod config;
pub mod events;
pub mod html;
pub mod params;
pub mod posts;
pub mod types;

pub use config::{AppConfig, ConfigError, EventsCredentials};
pub use params::{SearchSort, TimeWindow, ValidationError};
pub use types::*;
