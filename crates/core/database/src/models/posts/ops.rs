use lostfound_config::RepostPolicy;
use lostfound_result::Result;

use crate::search::Candidate;
use crate::{PartialPost, Post};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractPosts: Sync + Send {
    /// Insert a new post into the database
    async fn insert_post(&self, post: &Post) -> Result<()>;

    /// Fetch a post by its id
    async fn fetch_post(&self, id: &str) -> Result<Post>;

    /// Update a post with new information
    async fn update_post(&self, id: &str, partial: &PartialPost) -> Result<()>;

    /// Delete a post
    async fn delete_post(&self, id: &str) -> Result<()>;

    /// Append a user to the repost list, returns the resulting list
    async fn add_repost(
        &self,
        id: &str,
        user_id: &str,
        policy: RepostPolicy,
    ) -> Result<Vec<String>>;

    /// Fetch the id and description of every post, ordered by id
    async fn fetch_post_descriptions(&self) -> Result<Vec<Candidate>>;
}
