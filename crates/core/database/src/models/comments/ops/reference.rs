use std::collections::HashMap;

use lostfound_result::Result;

use crate::util::pagination::Pagination;
use crate::Comment;
use crate::ReferenceDb;

use super::AbstractComments;

/// Comments of a post, newest first
fn newest_first(comments: &HashMap<String, Comment>, post_id: &str) -> Vec<Comment> {
    let mut list: Vec<Comment> = comments
        .values()
        .filter(|comment| comment.post_id == post_id)
        .cloned()
        .collect();

    list.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    list
}

#[async_trait]
impl AbstractComments for ReferenceDb {
    /// Insert a new comment into the database
    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        let mut comments = self.comments.lock().await;
        if comments.contains_key(&comment.id) {
            Err(create_database_error!("insert", "comments"))
        } else {
            comments.insert(comment.id.to_string(), comment.clone());
            Ok(())
        }
    }

    /// Fetch a comment by its id
    async fn fetch_comment(&self, id: &str) -> Result<Comment> {
        let comments = self.comments.lock().await;
        comments
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownComment))
    }

    /// Fetch a page of a post's comments, newest first
    async fn fetch_comments(&self, post_id: &str, pagination: Pagination) -> Result<Vec<Comment>> {
        let comments = self.comments.lock().await;
        Ok(pagination.slice(newest_first(&comments, post_id)))
    }

    /// Fetch the newest `limit` comments of a post
    async fn fetch_recent_comments(&self, post_id: &str, limit: i64) -> Result<Vec<Comment>> {
        if limit <= 0 {
            return Ok(vec![]);
        }

        let comments = self.comments.lock().await;
        let mut list = newest_first(&comments, post_id);
        list.truncate(limit as usize);
        Ok(list)
    }

    /// Count the comments of a post
    async fn count_comments(&self, post_id: &str) -> Result<usize> {
        let comments = self.comments.lock().await;
        Ok(comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .count())
    }

    /// Replace a comment's text
    async fn update_comment(&self, id: &str, text: &str) -> Result<()> {
        let mut comments = self.comments.lock().await;
        let comment = comments
            .get_mut(id)
            .ok_or_else(|| create_error!(UnknownComment))?;

        comment.comment = text.to_string();
        Ok(())
    }

    /// Delete a comment and the replies to it
    async fn delete_comment(&self, id: &str) -> Result<()> {
        let mut comments = self.comments.lock().await;
        if comments.remove(id).is_none() {
            return Err(create_error!(UnknownComment));
        }

        comments.retain(|_, comment| comment.parent_comment_id.as_deref() != Some(id));
        Ok(())
    }

    /// Delete every comment of a post
    async fn delete_comments_for_post(&self, post_id: &str) -> Result<()> {
        let mut comments = self.comments.lock().await;
        comments.retain(|_, comment| comment.post_id != post_id);
        Ok(())
    }
}
