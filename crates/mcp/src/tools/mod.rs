pub mod events;
pub mod reddit;
mod registry;

pub use events::UpcomingEventsTool;
pub use reddit::{
    HotPostsTool, NewPostsTool, PostDetailsTool, SearchTool, TopPostsTool, UserInfoTool,
};
pub use registry::{
    json_schema_boolean, json_schema_enum, json_schema_integer, json_schema_object,
    json_schema_string, Tool, ToolRegistry,
};

use crate::protocol::CallToolResult;
use anyhow::{Context, Result};
use hearsay_core::AppConfig;
use hearsay_sdk::{EventFinder, EventsClient, RedditClient, UpstreamError};
use std::sync::Arc;
use tracing::error;

/// Registry holding every tool, wired to clients built from `config`.
///
/// Fails when the events credentials are missing so that a misconfigured
/// server never starts.
pub fn build_registry(config: &AppConfig) -> Result<ToolRegistry> {
    let reddit = RedditClient::from_app_config(config).context("Failed to create Reddit client")?;
    let events = EventsClient::from_app_config(config).context("Failed to create events client")?;
    let finder = EventFinder::new(events).with_concurrency(config.events.detail_concurrency);

    let mut registry = ToolRegistry::new();

    // Reddit tools
    registry.register(Arc::new(HotPostsTool::new(reddit.clone())));
    registry.register(Arc::new(NewPostsTool::new(reddit.clone())));
    registry.register(Arc::new(TopPostsTool::new(reddit.clone())));
    registry.register(Arc::new(SearchTool::new(reddit.clone())));
    registry.register(Arc::new(PostDetailsTool::new(reddit.clone())));
    registry.register(Arc::new(UserInfoTool::new(reddit)));

    // Events tools
    registry.register(Arc::new(UpcomingEventsTool::new(finder)));

    Ok(registry)
}

/// Error result for a failed upstream call.
///
/// Rejected arguments are echoed back so the caller can fix them; upstream
/// faults are logged and reported with the tool's fixed message.
pub(crate) fn upstream_failure(tool: &str, err: &UpstreamError, message: &str) -> CallToolResult {
    if err.is_invalid_input() {
        return CallToolResult::error(err.to_string());
    }
    error!(tool, error = %err, "Upstream request failed");
    CallToolResult::error(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearsay_core::ValidationError;

    fn configured() -> AppConfig {
        let mut config = AppConfig::default();
        config.events.username = Some("user".to_string());
        config.events.password = Some("pass".to_string());
        config
    }

    #[tokio::test]
    async fn test_build_registry_registers_all_tools() {
        let registry = build_registry(&configured()).unwrap();
        let names: Vec<_> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "getRedditHotPosts",
                "getRedditNewPosts",
                "getRedditPostDetails",
                "getRedditTopPosts",
                "getRedditUserInfo",
                "getUpcomingEvents",
                "searchReddit",
            ]
        );
    }

    #[tokio::test]
    async fn test_build_registry_requires_credentials() {
        let err = build_registry(&AppConfig::default()).err().unwrap();
        assert!(format!("{:#}", err).contains("EVENTS_API_USERNAME"));
    }

    #[test]
    fn test_upstream_failure_messages() {
        let invalid = UpstreamError::Validation(ValidationError::Empty { field: "query" });
        let result = upstream_failure("searchReddit", &invalid, "opaque");
        assert_eq!(result.text_content(), "Invalid argument: query must not be empty");

        let api = UpstreamError::Api {
            status: 500,
            message: "secret detail".to_string(),
        };
        let result = upstream_failure("searchReddit", &api, "opaque");
        assert!(result.is_error());
        assert_eq!(result.text_content(), "opaque");
    }
}
