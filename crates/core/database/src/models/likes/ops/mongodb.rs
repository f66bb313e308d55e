use ::mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use lostfound_result::{ErrorType, Result};

use crate::util::id::new_id;
use crate::Like;
use crate::MongoDb;

use super::AbstractLikes;

static COL: &str = "likes";

#[async_trait]
impl AbstractLikes for MongoDb {
    /// Toggle with a single pipeline update so concurrent toggles serialise
    /// on the document
    async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<Vec<String>> {
        let current = doc! { "$ifNull": [ "$usersIDs", [] ] };
        let pipeline = vec![doc! {
            "$set": {
                "_id": { "$ifNull": [ "$_id", new_id() ] },
                "createdAt": { "$ifNull": [ "$createdAt", "$$NOW" ] },
                "usersIDs": {
                    "$cond": [
                        { "$in": [ user_id, current.clone() ] },
                        {
                            "$filter": {
                                "input": current.clone(),
                                "cond": { "$ne": [ "$$this", user_id ] }
                            }
                        },
                        { "$concatArrays": [ current, [ user_id ] ] }
                    ]
                }
            }
        }];

        // Two first likes may race to upsert, the unique index rejects one
        for _ in 0..2 {
            match self
                .find_one_and_update::<Like>(
                    COL,
                    doc! { "postId": post_id },
                    pipeline.clone(),
                    FindOneAndUpdateOptions::builder()
                        .upsert(true)
                        .return_document(ReturnDocument::After)
                        .build(),
                )
                .await
            {
                Ok(like) => return Ok(like.map(|like| like.users_ids).unwrap_or_default()),
                Err(err) if matches!(err.error_type, ErrorType::DuplicateEntry { .. }) => continue,
                Err(err) => return Err(err),
            }
        }

        Err(create_database_error!("find_one_and_update", COL))
    }

    /// Union of the likers over every like document of a post, in like order
    async fn fetch_likers(&self, post_id: &str) -> Result<Vec<String>> {
        let likes: Vec<Like> = self.find(COL, doc! { "postId": post_id }).await?;

        let mut likers: Vec<String> = vec![];
        for user in likes.into_iter().flat_map(|like| like.users_ids) {
            if !likers.contains(&user) {
                likers.push(user);
            }
        }

        Ok(likers)
    }

    /// Remove the like documents of a post
    async fn delete_likes(&self, post_id: &str) -> Result<()> {
        self.delete_many(COL, doc! { "postId": post_id })
            .await
            .map(|_| ())
    }
}
