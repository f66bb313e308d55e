use chrono::Utc;
use lostfound_result::Result;

use crate::util::id::new_id;
use crate::Like;
use crate::ReferenceDb;

use super::AbstractLikes;

#[async_trait]
impl AbstractLikes for ReferenceDb {
    /// Toggle under the collection lock so the read and write cannot interleave
    async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<Vec<String>> {
        let mut likes = self.likes.lock().await;
        let like = likes.entry(post_id.to_string()).or_insert_with(|| Like {
            id: new_id(),
            post_id: post_id.to_string(),
            users_ids: vec![],
            created_at: Utc::now(),
        });

        if let Some(position) = like.users_ids.iter().position(|id| id == user_id) {
            like.users_ids.remove(position);
        } else {
            like.users_ids.push(user_id.to_string());
        }

        Ok(like.users_ids.clone())
    }

    /// Union of the likers over every like document of a post, in like order
    async fn fetch_likers(&self, post_id: &str) -> Result<Vec<String>> {
        let likes = self.likes.lock().await;
        Ok(likes
            .get(post_id)
            .map(|like| like.users_ids.clone())
            .unwrap_or_default())
    }

    /// Remove the like documents of a post
    async fn delete_likes(&self, post_id: &str) -> Result<()> {
        self.likes.lock().await.remove(post_id);
        Ok(())
    }
}
