// Reddit tools: listings, search, post details and user profiles

use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{
    json_schema_boolean, json_schema_enum, json_schema_integer, json_schema_object,
    json_schema_string, upstream_failure, Tool,
};
use anyhow::{Context, Result};
use base64::Engine;
use hearsay_core::params::{self, MAX_COMMENT_DEPTH, MAX_LIMIT};
use hearsay_core::posts::{self, ListingKind};
use hearsay_core::{Post, PostListing, SearchSort, TimeWindow};
use hearsay_sdk::{RedditClient, UpstreamError};
use serde::Deserialize;
use tracing::{debug, warn};

const FETCH_POSTS_FAILED: &str = "Error fetching posts from Reddit.";
const SEARCH_FAILED: &str = "Error searching Reddit.";
const POST_DETAILS_FAILED: &str = "Error fetching post details from Reddit.";
const USER_INFO_FAILED: &str = "Error fetching user info from Reddit.";

fn default_limit() -> u32 {
    10
}

fn default_search_limit() -> u32 {
    25
}

fn default_comment_limit() -> u32 {
    10
}

fn default_comment_depth() -> u32 {
    2
}

fn limit_schema(default: u32) -> serde_json::Value {
    json_schema_integer("Maximum number of posts to return", 1, MAX_LIMIT, default)
}

fn subreddit_schema() -> serde_json::Value {
    json_schema_string("Subreddit name, with or without the r/ prefix")
}

/// Render a listing, or the "no posts" message for an empty one
fn listing_result(kind: &ListingKind, subreddit: &str, listing: PostListing) -> CallToolResult {
    let posts: Vec<Post> = listing.data.children.into_iter().map(|t| t.data).collect();
    debug!(subreddit, count = posts.len(), "Listing fetched");
    CallToolResult::text(posts::format_post_list(kind, subreddit, &posts))
}

/// Validation failures are reported against the argument before any request
fn invalid_argument(err: hearsay_core::ValidationError) -> CallToolResult {
    CallToolResult::error(UpstreamError::from(err).to_string())
}

#[derive(Debug, Deserialize)]
struct ListingArgs {
    subreddit: String,
    #[serde(default = "default_limit")]
    limit: u32,
}

/// Hot posts from a subreddit
pub struct HotPostsTool {
    client: RedditClient,
}

impl HotPostsTool {
    pub fn new(client: RedditClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for HotPostsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "getRedditHotPosts".to_string(),
            description: "Get hot posts from a subreddit".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "subreddit": subreddit_schema(),
                    "limit": limit_schema(default_limit())
                }),
                vec!["subreddit"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListingArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for getRedditHotPosts")?;
        let subreddit = match params::subreddit(&args.subreddit) {
            Ok(name) => name,
            Err(e) => return Ok(invalid_argument(e)),
        };

        match self.client.hot_posts(&subreddit, args.limit).await {
            Ok(listing) => Ok(listing_result(&ListingKind::Hot, &subreddit, listing)),
            Err(e) => Ok(upstream_failure("getRedditHotPosts", &e, FETCH_POSTS_FAILED)),
        }
    }
}

/// Newest posts from a subreddit
pub struct NewPostsTool {
    client: RedditClient,
}

impl NewPostsTool {
    pub fn new(client: RedditClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for NewPostsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "getRedditNewPosts".to_string(),
            description: "Get the newest posts from a subreddit".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "subreddit": subreddit_schema(),
                    "limit": limit_schema(default_limit())
                }),
                vec!["subreddit"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListingArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for getRedditNewPosts")?;
        let subreddit = match params::subreddit(&args.subreddit) {
            Ok(name) => name,
            Err(e) => return Ok(invalid_argument(e)),
        };

        match self.client.new_posts(&subreddit, args.limit).await {
            Ok(listing) => Ok(listing_result(&ListingKind::New, &subreddit, listing)),
            Err(e) => Ok(upstream_failure("getRedditNewPosts", &e, FETCH_POSTS_FAILED)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TopPostsArgs {
    subreddit: String,
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    time: TimeWindow,
}

/// Top posts from a subreddit within a time window
pub struct TopPostsTool {
    client: RedditClient,
}

impl TopPostsTool {
    pub fn new(client: RedditClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for TopPostsTool {
    fn schema(&self) -> ToolSchema {
        let windows: Vec<&str> = TimeWindow::ALL.iter().map(|w| w.as_str()).collect();
        ToolSchema {
            name: "getRedditTopPosts".to_string(),
            description: "Get top posts from a subreddit for a time window".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "subreddit": subreddit_schema(),
                    "limit": limit_schema(default_limit()),
                    "time": json_schema_enum("Time window", &windows, TimeWindow::default().as_str())
                }),
                vec!["subreddit"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: TopPostsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for getRedditTopPosts")?;
        let subreddit = match params::subreddit(&args.subreddit) {
            Ok(name) => name,
            Err(e) => return Ok(invalid_argument(e)),
        };

        match self.client.top_posts(&subreddit, args.limit, args.time).await {
            Ok(listing) => Ok(listing_result(&ListingKind::Top(args.time), &subreddit, listing)),
            Err(e) => Ok(upstream_failure("getRedditTopPosts", &e, FETCH_POSTS_FAILED)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    subreddit: String,
    query: String,
    #[serde(default = "default_search_limit")]
    limit: u32,
    #[serde(default)]
    sort: SearchSort,
}

/// Search posts within a subreddit
pub struct SearchTool {
    client: RedditClient,
}

impl SearchTool {
    pub fn new(client: RedditClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for SearchTool {
    fn schema(&self) -> ToolSchema {
        let sorts: Vec<&str> = SearchSort::ALL.iter().map(|s| s.as_str()).collect();
        ToolSchema {
            name: "searchReddit".to_string(),
            description: "Search for posts within a subreddit".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "subreddit": subreddit_schema(),
                    "query": json_schema_string("Search query"),
                    "limit": limit_schema(default_search_limit()),
                    "sort": json_schema_enum("Result ordering", &sorts, SearchSort::default().as_str())
                }),
                vec!["subreddit", "query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchArgs =
            serde_json::from_value(arguments).context("Invalid arguments for searchReddit")?;
        let (subreddit, query) = match (
            params::subreddit(&args.subreddit),
            params::non_empty("query", &args.query),
        ) {
            (Ok(subreddit), Ok(query)) => (subreddit, query),
            (Err(e), _) | (_, Err(e)) => return Ok(invalid_argument(e)),
        };

        match self
            .client
            .search_subreddit(&subreddit, &query, args.limit, args.sort)
            .await
        {
            Ok(listing) => {
                let kind = ListingKind::Search {
                    query,
                    sort: args.sort,
                };
                Ok(listing_result(&kind, &subreddit, listing))
            }
            Err(e) => Ok(upstream_failure("searchReddit", &e, SEARCH_FAILED)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostDetailsArgs {
    post_id: String,
    #[serde(default = "default_comment_limit")]
    comment_limit: u32,
    #[serde(default = "default_comment_depth")]
    comment_depth: u32,
    #[serde(default)]
    fetch_image: bool,
}

/// A post with its comment tree, optionally with the linked image inlined
pub struct PostDetailsTool {
    client: RedditClient,
}

impl PostDetailsTool {
    pub fn new(client: RedditClient) -> Self {
        Self { client }
    }

    /// Inline image block for the post URL. Failures leave the result text-only.
    async fn image_content(&self, url: &str) -> Option<ToolContent> {
        let ext = posts::image_extension(url)?;
        match self.client.fetch_image(url).await {
            Ok((bytes, content_type)) => {
                let mime_type = content_type
                    .filter(|ct| ct.starts_with("image/"))
                    .unwrap_or_else(|| {
                        mime_guess::from_ext(&ext)
                            .first_or_octet_stream()
                            .essence_str()
                            .to_string()
                    });
                debug!(url, %mime_type, size = bytes.len(), "Image fetched");
                Some(ToolContent::Image {
                    data: base64::engine::general_purpose::STANDARD.encode(&bytes),
                    mime_type,
                })
            }
            Err(e) => {
                warn!(url, error = %e, "Image fetch failed, returning text only");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl Tool for PostDetailsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "getRedditPostDetails".to_string(),
            description: "Get a post with its comments. Optionally inline the linked image."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "post_id": json_schema_string("Post id, with or without the t3_ prefix"),
                    "comment_limit": json_schema_integer(
                        "Maximum number of comments to fetch", 1, MAX_LIMIT, default_comment_limit()
                    ),
                    "comment_depth": json_schema_integer(
                        "Maximum reply depth to fetch", 1, MAX_COMMENT_DEPTH, default_comment_depth()
                    ),
                    "fetch_image": json_schema_boolean(
                        "Inline the post's image when its URL points to one (default: false)"
                    )
                }),
                vec!["post_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: PostDetailsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for getRedditPostDetails")?;

        let thread = match self
            .client
            .post_details(&args.post_id, args.comment_limit, args.comment_depth)
            .await
        {
            Ok(thread) => thread,
            Err(e) => return Ok(upstream_failure("getRedditPostDetails", &e, POST_DETAILS_FAILED)),
        };

        let Some(post) = thread.post() else {
            return Ok(CallToolResult::text(format!(
                "No post found with id {}",
                args.post_id.trim()
            )));
        };

        let mut result = CallToolResult::text(posts::format_post_details(post, thread.comments()));
        if args.fetch_image {
            if let Some(image) = self.image_content(&post.url).await {
                result.content.push(image);
            }
        }
        Ok(result)
    }
}

#[derive(Debug, Deserialize)]
struct UserInfoArgs {
    username: String,
}

/// Public profile summary for a user
pub struct UserInfoTool {
    client: RedditClient,
}

impl UserInfoTool {
    pub fn new(client: RedditClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UserInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "getRedditUserInfo".to_string(),
            description: "Get karma, account age and flags for a user".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "username": json_schema_string("Username, with or without the u/ prefix")
                }),
                vec!["username"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UserInfoArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for getRedditUserInfo")?;

        match self.client.user_info(&args.username).await {
            Ok(user) => Ok(CallToolResult::text(posts::format_user_info(&user.data))),
            Err(e) => Ok(upstream_failure("getRedditUserInfo", &e, USER_INFO_FAILED)),
        }
    }
}
