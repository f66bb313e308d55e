use lostfound_result::Result;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractLikes: Sync + Send {
    /// Atomically add `user_id` to the post's likers if absent, otherwise
    /// remove them. Returns the likers after the change.
    async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<Vec<String>>;

    /// Union of the likers over every like document of a post, in like order
    async fn fetch_likers(&self, post_id: &str) -> Result<Vec<String>>;

    /// Remove the like documents of a post
    async fn delete_likes(&self, post_id: &str) -> Result<()>;
}
