//! Reddit API endpoints.

use crate::error::{SdkResult, UpstreamError};
use crate::transport::HttpTransport;
use bytes::Bytes;
use hearsay_core::params::{self, MAX_COMMENT_DEPTH};
use hearsay_core::{PostAndComments, PostListing, SearchSort, Thing, TimeWindow, UserAbout};

/// Client for the public Reddit JSON endpoints.
///
/// Every method validates its arguments, issues exactly one GET and returns
/// the parsed body without further shaping.
#[derive(Debug, Clone)]
pub struct RedditClient {
    http: HttpTransport,
}

impl RedditClient {
    pub(crate) fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    /// `GET /r/{subreddit}/hot.json?limit={limit}`
    pub async fn hot_posts(&self, subreddit: &str, limit: u32) -> SdkResult<PostListing> {
        let subreddit = params::subreddit(subreddit)?;
        let limit = params::limit("limit", limit)?;

        self.http
            .get_json(
                &format!("r/{}/hot.json", subreddit),
                &[("limit", limit.to_string())],
            )
            .await
    }

    /// `GET /r/{subreddit}/new.json?limit={limit}`
    pub async fn new_posts(&self, subreddit: &str, limit: u32) -> SdkResult<PostListing> {
        let subreddit = params::subreddit(subreddit)?;
        let limit = params::limit("limit", limit)?;

        self.http
            .get_json(
                &format!("r/{}/new.json", subreddit),
                &[("limit", limit.to_string())],
            )
            .await
    }

    /// `GET /r/{subreddit}/top.json?limit={limit}&t={time}`
    pub async fn top_posts(
        &self,
        subreddit: &str,
        limit: u32,
        time: TimeWindow,
    ) -> SdkResult<PostListing> {
        let subreddit = params::subreddit(subreddit)?;
        let limit = params::limit("limit", limit)?;

        self.http
            .get_json(
                &format!("r/{}/top.json", subreddit),
                &[("limit", limit.to_string()), ("t", time.to_string())],
            )
            .await
    }

    /// `GET /r/{subreddit}/search.json?q={query}&limit={limit}&restrict_sr=1&sort={sort}`
    pub async fn search_subreddit(
        &self,
        subreddit: &str,
        query: &str,
        limit: u32,
        sort: SearchSort,
    ) -> SdkResult<PostListing> {
        let subreddit = params::subreddit(subreddit)?;
        let query = params::non_empty("query", query)?;
        let limit = params::limit("limit", limit)?;

        self.http
            .get_json(
                &format!("r/{}/search.json", subreddit),
                &[
                    ("q", query),
                    ("limit", limit.to_string()),
                    ("restrict_sr", "1".to_string()),
                    ("sort", sort.to_string()),
                ],
            )
            .await
    }

    /// `GET /comments/{post_id}.json?limit={comment_limit}&depth={comment_depth}`
    pub async fn post_details(
        &self,
        post_id: &str,
        comment_limit: u32,
        comment_depth: u32,
    ) -> SdkResult<PostAndComments> {
        let post_id = params::post_id(post_id)?;
        let comment_limit = params::limit("comment_limit", comment_limit)?;
        let comment_depth = params::in_range("comment_depth", comment_depth, 1, MAX_COMMENT_DEPTH)?;

        self.http
            .get_json(
                &format!("comments/{}.json", post_id),
                &[
                    ("limit", comment_limit.to_string()),
                    ("depth", comment_depth.to_string()),
                ],
            )
            .await
    }

    /// `GET /user/{username}/about.json`
    pub async fn user_info(&self, username: &str) -> SdkResult<Thing<UserAbout>> {
        let username = params::username(username)?;

        self.http
            .get_json(
                &format!("user/{}/about.json", username),
                &[] as &[(&str, &str)],
            )
            .await
    }

    /// Download an image linked from a post. Returns the bytes and the
    /// content type reported by the host.
    pub async fn fetch_image(&self, url: &str) -> SdkResult<(Bytes, Option<String>)> {
        let (bytes, content_type) = self.http.get_bytes(url).await?;
        if bytes.is_empty() {
            return Err(UpstreamError::NotFound(format!("empty image body at {}", url)));
        }
        Ok((bytes, content_type))
    }
}
