use lostfound_config::RepostPolicy;
use lostfound_result::Result;

use crate::search::Candidate;
use crate::ReferenceDb;
use crate::{PartialPost, Post};

use super::AbstractPosts;

#[async_trait]
impl AbstractPosts for ReferenceDb {
    /// Insert a new post into the database
    async fn insert_post(&self, post: &Post) -> Result<()> {
        let mut posts = self.posts.lock().await;
        if posts.contains_key(&post.id) {
            Err(create_database_error!("insert", "posts"))
        } else {
            posts.insert(post.id.to_string(), post.clone());
            Ok(())
        }
    }

    /// Fetch a post by its id
    async fn fetch_post(&self, id: &str) -> Result<Post> {
        let posts = self.posts.lock().await;
        posts
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownPost))
    }

    /// Update a post with new information
    async fn update_post(&self, id: &str, partial: &PartialPost) -> Result<()> {
        let mut posts = self.posts.lock().await;
        if let Some(post) = posts.get_mut(id) {
            post.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(UnknownPost))
        }
    }

    /// Delete a post
    async fn delete_post(&self, id: &str) -> Result<()> {
        let mut posts = self.posts.lock().await;
        if posts.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(UnknownPost))
        }
    }

    /// Append a user to the repost list, returns the resulting list
    async fn add_repost(
        &self,
        id: &str,
        user_id: &str,
        policy: RepostPolicy,
    ) -> Result<Vec<String>> {
        let mut posts = self.posts.lock().await;
        let post = posts.get_mut(id).ok_or_else(|| create_error!(UnknownPost))?;

        if policy == RepostPolicy::Multiset || !post.repost.iter().any(|u| u == user_id) {
            post.repost.push(user_id.to_string());
        }

        Ok(post.repost.clone())
    }

    /// Fetch the id and description of every post, ordered by id
    async fn fetch_post_descriptions(&self) -> Result<Vec<Candidate>> {
        let posts = self.posts.lock().await;
        let mut candidates: Vec<Candidate> = posts
            .values()
            .map(|post| Candidate::new(&post.id, &post.description))
            .collect();

        candidates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(candidates)
    }
}
