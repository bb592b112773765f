// Reddit data model: projections of the upstream JSON that the tools consume

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Generic upstream wrapper `{ "kind": ..., "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

/// Paginated collection wrapper (the `data` of a `Listing` thing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl<T> Listing<T> {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A listing of posts as returned by the subreddit endpoints
pub type PostListing = Thing<Listing<Thing<Post>>>;

/// Post summary as it appears in subreddit listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub num_comments: u64,
}

/// Post with its body text, from the comments endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetails {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub num_comments: u64,
    pub url: String,
}

/// A single comment. `replies` is `None` whenever upstream says there are none,
/// whichever sentinel it used for that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub depth: u32,
    #[serde(default, deserialize_with = "deserialize_replies")]
    pub replies: Option<Vec<CommentNode>>,
}

/// One child of a comment listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CommentNode {
    Comment(Comment),
    /// Anything that is not a `t1` comment (for example `more` stubs)
    Other { kind: String },
}

impl CommentNode {
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            CommentNode::Comment(comment) => Some(comment),
            CommentNode::Other { .. } => None,
        }
    }
}

impl<'de> Deserialize<'de> for CommentNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Thing::<serde_json::Value>::deserialize(deserializer)?;
        if raw.kind == COMMENT_KIND {
            let comment = serde_json::from_value(raw.data).map_err(de::Error::custom)?;
            Ok(CommentNode::Comment(comment))
        } else {
            Ok(CommentNode::Other { kind: raw.kind })
        }
    }
}

/// Upstream kind tag for comments
pub const COMMENT_KIND: &str = "t1";

fn deserialize_replies<'de, D>(deserializer: D) -> Result<Option<Vec<CommentNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        // "" and null both mean "no replies"
        serde_json::Value::Null | serde_json::Value::String(_) => Ok(None),
        other => {
            let listing: Thing<Listing<CommentNode>> =
                serde_json::from_value(other).map_err(de::Error::custom)?;
            if listing.data.is_empty() {
                Ok(None)
            } else {
                Ok(Some(listing.data.children))
            }
        }
    }
}

/// The comments endpoint returns a two element array: the post listing, then
/// the comment listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PostAndComments(
    pub Thing<Listing<Thing<PostDetails>>>,
    pub Thing<Listing<CommentNode>>,
);

impl PostAndComments {
    pub fn post(&self) -> Option<&PostDetails> {
        self.0.data.children.first().map(|thing| &thing.data)
    }

    pub fn comments(&self) -> &[CommentNode] {
        &self.1.data.children
    }
}

/// Public profile data from `/user/{name}/about.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAbout {
    pub name: String,
    #[serde(default)]
    pub link_karma: i64,
    #[serde(default)]
    pub comment_karma: i64,
    #[serde(default)]
    pub total_karma: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub is_gold: bool,
    #[serde(default)]
    pub is_mod: bool,
    #[serde(default)]
    pub verified: bool,
}
