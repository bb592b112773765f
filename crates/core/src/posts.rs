// Text rendering for post listings, post details and user profiles

use crate::comments::format_comments;
use crate::params::{SearchSort, TimeWindow};
use crate::types::{CommentNode, Post, PostDetails, UserAbout};
use chrono::{DateTime, Utc};

/// Which listing produced a set of posts; drives the header and empty message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingKind {
    Hot,
    New,
    Top(TimeWindow),
    Search { query: String, sort: SearchSort },
}

impl ListingKind {
    fn header(&self, subreddit: &str) -> String {
        match self {
            ListingKind::Hot => format!("Hot posts in r/{}:", subreddit),
            ListingKind::New => format!("New posts in r/{}:", subreddit),
            ListingKind::Top(window) => {
                format!("Top posts in r/{} (time: {}):", subreddit, window)
            }
            ListingKind::Search { query, sort } => format!(
                "Search results for '{}' in r/{} (sorted by {}):",
                query, subreddit, sort
            ),
        }
    }

    fn empty_message(&self, subreddit: &str) -> String {
        match self {
            ListingKind::Hot => format!("No hot posts found in r/{}", subreddit),
            ListingKind::New => format!("No new posts found in r/{}", subreddit),
            ListingKind::Top(_) => format!("No top posts found in r/{}", subreddit),
            ListingKind::Search { query, .. } => {
                format!("No posts matching '{}' found in r/{}", query, subreddit)
            }
        }
    }
}

/// Numbered post list, or the "no posts" message when the listing is empty
pub fn format_post_list(kind: &ListingKind, subreddit: &str, posts: &[Post]) -> String {
    if posts.is_empty() {
        return kind.empty_message(subreddit);
    }

    let entries = posts
        .iter()
        .enumerate()
        .map(|(index, post)| {
            format!(
                "{}. [{}] {}\n   Author: {}, Upvotes: {}, Comments: {}\n   URL: {}",
                index + 1,
                post.id,
                post.title,
                post.author,
                post.ups,
                post.num_comments,
                post.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{}", kind.header(subreddit), entries)
}

/// Post header, body and the rendered comment tree
pub fn format_post_details(post: &PostDetails, comments: &[CommentNode]) -> String {
    let mut result = String::new();
    result.push_str(&format!("Title: {}\n", post.title));
    result.push_str(&format!("Author: {}\n", post.author));
    result.push_str(&format!("Upvotes: {}\n", post.ups));
    result.push_str(&format!("Comments: {}\n", post.num_comments));
    result.push_str(&format!("URL: {}\n\n", post.url));
    result.push_str(&format!("Content:\n{}\n\n", post.selftext));
    result.push_str("Comments:\n");
    result.push_str(&format_comments(comments, 0));
    result
}

pub fn format_user_info(user: &UserAbout) -> String {
    let created = DateTime::<Utc>::from_timestamp(user.created_utc as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let total = if user.total_karma != 0 {
        user.total_karma
    } else {
        user.link_karma + user.comment_karma
    };

    let mut flags = Vec::new();
    if user.verified {
        flags.push("verified");
    }
    if user.is_gold {
        flags.push("premium");
    }
    if user.is_mod {
        flags.push("moderator");
    }

    let mut result = format!(
        "User: u/{}\nLink karma: {}\nComment karma: {}\nTotal karma: {}\nAccount created: {}",
        user.name, user.link_karma, user.comment_karma, total, created
    );
    if !flags.is_empty() {
        result.push_str(&format!("\nFlags: {}", flags.join(", ")));
    }
    result
}

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Image extension of a post URL (lowercased), ignoring query and fragment
pub fn image_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let last_segment = path.rsplit('/').next().unwrap_or("");
    let (_, ext) = last_segment.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
