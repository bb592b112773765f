//! Hot posts and post details example.
//!
//! Fetches the hot listing of a subreddit, then renders the comment tree of
//! the first post.
//!
//! Run with: cargo run --example hot_posts -- rust

use hearsay_core::posts::{format_post_details, format_post_list, ListingKind};
use hearsay_sdk::{RedditClient, SdkResult};
use std::time::Duration;

#[tokio::main]
async fn main() -> SdkResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let subreddit = std::env::args().nth(1).unwrap_or_else(|| "rust".to_string());

    let client = RedditClient::builder()
        .base_url("https://www.reddit.com")
        .user_agent("hearsay-example/0.1")
        .timeout(Duration::from_secs(30))
        .reddit()?;

    let listing = client.hot_posts(&subreddit, 5).await?;
    let posts: Vec<_> = listing.data.children.into_iter().map(|t| t.data).collect();
    println!("{}", format_post_list(&ListingKind::Hot, &subreddit, &posts));

    if let Some(first) = posts.first() {
        println!("\n---\n");
        let details = client.post_details(&first.id, 10, 3).await?;
        if let Some(post) = details.post() {
            println!("{}", format_post_details(post, details.comments()));
        }
    }

    Ok(())
}
