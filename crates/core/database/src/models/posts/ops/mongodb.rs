use ::mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use bson::Document;
use lostfound_config::RepostPolicy;
use lostfound_result::Result;

use crate::search::Candidate;
use crate::MongoDb;
use crate::{PartialPost, Post};

use super::AbstractPosts;

static COL: &str = "posts";

#[async_trait]
impl AbstractPosts for MongoDb {
    /// Insert a new post into the database
    async fn insert_post(&self, post: &Post) -> Result<()> {
        self.insert_one(COL, post).await
    }

    /// Fetch a post by its id
    async fn fetch_post(&self, id: &str) -> Result<Post> {
        self.find_one_by_id(COL, id)
            .await?
            .ok_or_else(|| create_error!(UnknownPost))
    }

    /// Update a post with new information
    async fn update_post(&self, id: &str, partial: &PartialPost) -> Result<()> {
        let result = self.update_one_by_id(COL, id, partial).await?;
        if result.matched_count == 0 {
            Err(create_error!(UnknownPost))
        } else {
            Ok(())
        }
    }

    /// Delete a post
    async fn delete_post(&self, id: &str) -> Result<()> {
        if self.delete_one_by_id(COL, id).await? == 0 {
            Err(create_error!(UnknownPost))
        } else {
            Ok(())
        }
    }

    /// Append a user to the repost list, returns the resulting list
    async fn add_repost(
        &self,
        id: &str,
        user_id: &str,
        policy: RepostPolicy,
    ) -> Result<Vec<String>> {
        let update = match policy {
            RepostPolicy::Dedup => doc! { "$addToSet": { "repost": user_id } },
            RepostPolicy::Multiset => doc! { "$push": { "repost": user_id } },
        };

        let post: Option<Post> = self
            .find_one_and_update(
                COL,
                doc! { "_id": id },
                update,
                FindOneAndUpdateOptions::builder()
                    .return_document(ReturnDocument::After)
                    .build(),
            )
            .await?;

        post.map(|post| post.repost)
            .ok_or_else(|| create_error!(UnknownPost))
    }

    /// Fetch the id and description of every post, ordered by id
    async fn fetch_post_descriptions(&self) -> Result<Vec<Candidate>> {
        let documents: Vec<Document> = self
            .find_with_options(
                COL,
                doc! {},
                FindOptions::builder()
                    .projection(doc! { "_id": 1, "description": 1 })
                    .sort(doc! { "_id": 1 })
                    .build(),
            )
            .await?;

        Ok(documents
            .iter()
            .filter_map(|document| {
                Some(Candidate::new(
                    document.get_str("_id").ok()?,
                    document.get_str("description").unwrap_or_default(),
                ))
            })
            .collect())
    }
}
