use lostfound_result::Result;

use crate::util::pagination::Pagination;
use crate::Comment;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractComments: Sync + Send {
    /// Insert a new comment into the database
    async fn insert_comment(&self, comment: &Comment) -> Result<()>;

    /// Fetch a comment by its id
    async fn fetch_comment(&self, id: &str) -> Result<Comment>;

    /// Fetch a page of a post's comments, newest first
    async fn fetch_comments(&self, post_id: &str, pagination: Pagination) -> Result<Vec<Comment>>;

    /// Fetch the newest `limit` comments of a post
    async fn fetch_recent_comments(&self, post_id: &str, limit: i64) -> Result<Vec<Comment>>;

    /// Count the comments of a post
    async fn count_comments(&self, post_id: &str) -> Result<usize>;

    /// Replace a comment's text
    async fn update_comment(&self, id: &str, text: &str) -> Result<()>;

    /// Delete a comment and the replies to it
    async fn delete_comment(&self, id: &str) -> Result<()>;

    /// Delete every comment of a post
    async fn delete_comments_for_post(&self, post_id: &str) -> Result<()>;
}
