//! Enriched, paginated post listings
//!
//! Every listing endpoint goes through [`compose_feed`]: a selector picks the
//! posts, then each post is joined with its author's public profile, like
//! and comment counts, the newest comments and its repost count.
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::{id::validate_id, pagination::Pagination};
use crate::Database;

#[cfg(feature = "mongodb")]
mod mongodb;
mod pipeline;
mod reference;

pub use pipeline::feed_pipeline;

/// Number of newest comments embedded in each post unless configured
pub const DEFAULT_RECENT_COMMENTS: i64 = 2;

/// Which posts a feed contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSelector {
    /// A single post
    ById(String),
    /// Every post, newest first
    All,
    /// Posts written by a user, newest first
    ByAuthor(String),
    /// Posts a user reposted, newest first
    RepostedBy(String),
    /// The given posts in the given order
    ByIds(Vec<String>),
}

/// Feed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub selector: FeedSelector,
    /// User the `isLiked` flag is computed for
    pub requester: String,
    pub pagination: Option<Pagination>,
    /// How many of the newest comments to embed, `0` embeds none
    pub recent_comments: i64,
}

impl FeedQuery {
    pub fn new(selector: FeedSelector, requester: &str) -> FeedQuery {
        FeedQuery {
            selector,
            requester: requester.to_string(),
            pagination: None,
            recent_comments: DEFAULT_RECENT_COMMENTS,
        }
    }

    pub fn paginate(self, pagination: Pagination) -> FeedQuery {
        FeedQuery {
            pagination: Some(pagination),
            ..self
        }
    }

    pub fn recent_comments(self, recent_comments: i64) -> FeedQuery {
        FeedQuery {
            recent_comments: recent_comments.max(0),
            ..self
        }
    }

    /// Reject malformed ids and unbounded listings
    pub fn validate(&self) -> Result<()> {
        match &self.selector {
            FeedSelector::ById(id) => validate_id("id", id),
            FeedSelector::ByAuthor(id) | FeedSelector::RepostedBy(id) => validate_id("id", id),
            FeedSelector::All if self.pagination.is_none() => Err(validation_error!(
                FailedValidation,
                "page",
                "a page is required when listing every post"
            )),
            FeedSelector::All | FeedSelector::ByIds(_) => Ok(()),
        }
    }
}

#[async_trait]
pub trait AbstractFeed: Sync + Send {
    /// Select and enrich posts, the query must already be validated
    async fn fetch_feed(&self, query: &FeedQuery) -> Result<Vec<v0::FeedPost>>;
}

/// Build a feed
pub async fn compose_feed(db: &Database, query: FeedQuery) -> Result<Vec<v0::FeedPost>> {
    query.validate()?;

    if let FeedSelector::ByIds(ids) = &query.selector {
        if ids.is_empty() {
            return Ok(vec![]);
        }
    }

    db.fetch_feed(&query).await
}
