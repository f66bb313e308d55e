use chrono::{DateTime, Utc};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{util::id::new_id, Database, User};

auto_derived!(
    /// Comment on a post
    pub struct Comment {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Post this comment belongs to
        #[serde(rename = "postId")]
        pub post_id: String,
        /// Author
        #[serde(rename = "userId")]
        pub user_id: String,
        /// Comment text
        pub comment: String,
        /// Comment this one replies to, always on the same post
        #[serde(
            rename = "parentCommentId",
            skip_serializing_if = "Option::is_none",
            default
        )]
        pub parent_comment_id: Option<String>,
        /// Creation time
        #[serde(rename = "createdAt", with = "crate::util::iso_bson_chrono")]
        pub created_at: DateTime<Utc>,
    }
);

impl Comment {
    /// Comment on a post, or reply to `parent` on the same post
    pub async fn create(
        db: &Database,
        post_id: &str,
        author: &User,
        text: String,
        parent: Option<&str>,
    ) -> Result<Comment> {
        db.fetch_post(post_id).await?;

        if let Some(parent) = parent {
            let parent = db.fetch_comment(parent).await?;
            if parent.post_id != post_id {
                return Err(validation_error!(
                    InvalidOperation,
                    "parentCommentId",
                    "parent comment belongs to another post"
                ));
            }
        }

        let comment = Comment {
            id: new_id(),
            post_id: post_id.to_string(),
            user_id: author.id.to_string(),
            comment: text.trim().to_string(),
            parent_comment_id: parent.map(str::to_string),
            created_at: Utc::now(),
        };

        db.insert_comment(&comment).await?;
        Ok(comment)
    }

    /// Replace the comment text, author only
    pub async fn edit(&mut self, db: &Database, editor: &User, text: String) -> Result<()> {
        if self.user_id != editor.id {
            return Err(create_error!(NotOwner));
        }

        let text = text.trim().to_string();
        db.update_comment(&self.id, &text).await?;
        self.comment = text;
        Ok(())
    }

    /// Delete the comment and its replies, author only
    pub async fn delete(self, db: &Database, requester: &User) -> Result<()> {
        if self.user_id != requester.id {
            return Err(create_error!(NotOwner));
        }

        db.delete_comment(&self.id).await
    }
}

impl From<Comment> for v0::Comment {
    fn from(value: Comment) -> Self {
        v0::Comment {
            id: value.id,
            post_id: value.post_id,
            user_id: value.user_id,
            comment: value.comment,
            parent_comment_id: value.parent_comment_id,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use lostfound_result::{ErrorKind, ErrorType};

    use crate::util::pagination::Pagination;
    use crate::util::test_fixtures::{create_post, create_user};
    use crate::Comment;

    #[tokio::test]
    async fn crud() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let other = create_user(&db, "other").await;
            let post = create_post(&db, &author, "Lost cat").await;

            let mut comment = Comment::create(&db, &post.id, &other, " seen her ".into(), None)
                .await
                .unwrap();
            assert_eq!(comment.comment, "seen her");

            let reply = Comment::create(&db, &post.id, &author, "where?".into(), Some(comment.id.as_str()))
                .await
                .unwrap();
            assert_eq!(reply.parent_comment_id.as_deref(), Some(comment.id.as_str()));

            let err = comment
                .edit(&db, &author, "hijacked".into())
                .await
                .unwrap_err();
            assert_eq!(err.error_type.kind(), ErrorKind::Forbidden);

            comment.edit(&db, &other, "seen her twice".into()).await.unwrap();
            assert_eq!(
                db.fetch_comment(&comment.id).await.unwrap().comment,
                "seen her twice"
            );

            assert_eq!(db.count_comments(&post.id).await.unwrap(), 2);

            let page = db
                .fetch_comments(&post.id, Pagination::new(1, 10).unwrap())
                .await
                .unwrap();
            assert_eq!(page.len(), 2);
            assert_eq!(page[0].id, reply.id);

            comment.clone().delete(&db, &other).await.unwrap();
            assert!(matches!(
                db.fetch_comment(&comment.id).await.unwrap_err().error_type,
                ErrorType::UnknownComment
            ));
            assert_eq!(db.count_comments(&post.id).await.unwrap(), 0);
        });
    }

    #[tokio::test]
    async fn reply_must_target_same_post() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let first = create_post(&db, &author, "Lost cat").await;
            let second = create_post(&db, &author, "Found dog").await;

            let comment = Comment::create(&db, &first.id, &author, "hi".into(), None)
                .await
                .unwrap();

            let err = Comment::create(&db, &second.id, &author, "hi".into(), Some(comment.id.as_str()))
                .await
                .unwrap_err();
            assert_eq!(err.error_type.kind(), ErrorKind::Validation);
        });
    }

    #[tokio::test]
    async fn recent_comments_are_newest_first() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let post = create_post(&db, &author, "Lost cat").await;

            let mut ids = vec![];
            for i in 0..4 {
                let comment = Comment::create(&db, &post.id, &author, format!("#{i}"), None)
                    .await
                    .unwrap();
                ids.push(comment.id);
            }

            let recent = db.fetch_recent_comments(&post.id, 2).await.unwrap();
            assert_eq!(
                recent.iter().map(|c| c.id.clone()).collect::<Vec<_>>(),
                vec![ids[3].clone(), ids[2].clone()]
            );
            assert!(db.fetch_recent_comments(&post.id, 0).await.unwrap().is_empty());
        });
    }
}
