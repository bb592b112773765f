// Upcoming events tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, upstream_failure, Tool};
use anyhow::{Context, Result};
use hearsay_core::events::EVENT_WINDOW_DAYS;
use hearsay_sdk::{EventFinder, UpstreamError};
use serde::Deserialize;
use tracing::info;

const EVENTS_FAILED: &str = "Error fetching events.";

#[derive(Debug, Deserialize)]
struct UpcomingEventsArgs {
    location: String,
}

/// Events in the next seven days at a location, as a JSON array
pub struct UpcomingEventsTool {
    finder: EventFinder,
}

impl UpcomingEventsTool {
    pub fn new(finder: EventFinder) -> Self {
        Self { finder }
    }
}

#[async_trait::async_trait]
impl Tool for UpcomingEventsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "getUpcomingEvents".to_string(),
            description: format!(
                "Get events happening in the next {} days at a location. \
                 Returns a JSON array of events with descriptions and ticket information.",
                EVENT_WINDOW_DAYS
            ),
            input_schema: json_schema_object(
                serde_json::json!({
                    "location": json_schema_string("City, region or venue name to search")
                }),
                vec!["location"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UpcomingEventsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for getUpcomingEvents")?;

        let upcoming = match self.finder.upcoming(&args.location).await {
            Ok(upcoming) => upcoming,
            Err(e @ UpstreamError::LocationNotFound(_)) => {
                info!(location = %args.location.trim(), "Location not found");
                return Ok(CallToolResult::error(e.to_string()));
            }
            Err(e) => return Ok(upstream_failure("getUpcomingEvents", &e, EVENTS_FAILED)),
        };

        if upcoming.events.is_empty() {
            return Ok(CallToolResult::text(format!(
                "No events found in {} for the next {} days",
                upcoming.location, EVENT_WINDOW_DAYS
            )));
        }

        let body = serde_json::to_string_pretty(&upcoming.events)
            .context("Failed to serialize events")?;
        Ok(CallToolResult::text(body))
    }
}
