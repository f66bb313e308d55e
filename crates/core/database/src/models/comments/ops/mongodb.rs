use ::mongodb::options::FindOptions;
use lostfound_result::Result;

use crate::util::pagination::Pagination;
use crate::Comment;
use crate::MongoDb;

use super::AbstractComments;

static COL: &str = "comments";

#[async_trait]
impl AbstractComments for MongoDb {
    /// Insert a new comment into the database
    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        self.insert_one(COL, comment).await
    }

    /// Fetch a comment by its id
    async fn fetch_comment(&self, id: &str) -> Result<Comment> {
        self.find_one_by_id(COL, id)
            .await?
            .ok_or_else(|| create_error!(UnknownComment))
    }

    /// Fetch a page of a post's comments, newest first
    async fn fetch_comments(&self, post_id: &str, pagination: Pagination) -> Result<Vec<Comment>> {
        self.find_with_options(
            COL,
            doc! { "postId": post_id },
            FindOptions::builder()
                .sort(doc! { "createdAt": -1, "_id": -1 })
                .skip(pagination.skip() as u64)
                .limit(pagination.limit)
                .build(),
        )
        .await
    }

    /// Fetch the newest `limit` comments of a post
    async fn fetch_recent_comments(&self, post_id: &str, limit: i64) -> Result<Vec<Comment>> {
        if limit <= 0 {
            return Ok(vec![]);
        }

        self.find_with_options(
            COL,
            doc! { "postId": post_id },
            FindOptions::builder()
                .sort(doc! { "createdAt": -1, "_id": -1 })
                .limit(limit)
                .build(),
        )
        .await
    }

    /// Count the comments of a post
    async fn count_comments(&self, post_id: &str) -> Result<usize> {
        self.count_documents(COL, doc! { "postId": post_id })
            .await
            .map(|count| count as usize)
    }

    /// Replace a comment's text
    async fn update_comment(&self, id: &str, text: &str) -> Result<()> {
        let result = self
            .update_one(
                COL,
                doc! { "_id": id },
                doc! { "$set": { "comment": text } },
            )
            .await?;

        if result.matched_count == 0 {
            Err(create_error!(UnknownComment))
        } else {
            Ok(())
        }
    }

    /// Delete a comment and the replies to it
    async fn delete_comment(&self, id: &str) -> Result<()> {
        if self.delete_one_by_id(COL, id).await? == 0 {
            return Err(create_error!(UnknownComment));
        }

        self.delete_many(COL, doc! { "parentCommentId": id })
            .await
            .map(|_| ())
    }

    /// Delete every comment of a post
    async fn delete_comments_for_post(&self, post_id: &str) -> Result<()> {
        self.delete_many(COL, doc! { "postId": post_id })
            .await
            .map(|_| ())
    }
}
