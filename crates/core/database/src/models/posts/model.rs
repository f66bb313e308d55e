use chrono::{DateTime, Utc};
use lostfound_config::RepostPolicy;
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{util::id::new_id, Database, User};

fn default_category() -> String {
    "other".to_string()
}

auto_derived!(
    /// Lost or found item listing
    pub struct Post {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Short title
        pub title: String,
        /// Free text description, searched fuzzily
        pub description: String,
        /// Item status
        pub status: v0::PostStatus,
        /// Item category
        #[serde(default = "default_category")]
        pub category: String,
        /// Where the item was lost or found
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub location: Option<v0::Location>,
        /// Image URLs
        #[serde(default)]
        pub images: Vec<String>,
        /// Labels suggested by the classifier
        #[serde(rename = "predictedItems", default)]
        pub predicted_items: Vec<v0::PredictedItem>,
        /// How to reach the author
        #[serde(rename = "contactInfo", default)]
        pub contact_info: String,
        /// When the item was lost or found
        #[serde(with = "crate::util::iso_bson_chrono")]
        pub when: DateTime<Utc>,
        /// Author
        pub user_id: String,
        /// Users who reposted, see [`RepostPolicy`]
        #[serde(default)]
        pub repost: Vec<String>,
        /// Creation time
        #[serde(rename = "createdAt", with = "crate::util::iso_bson_chrono")]
        pub created_at: DateTime<Utc>,
        /// Last edit
        #[serde(rename = "updatedAt", with = "crate::util::iso_bson_chrono")]
        pub updated_at: DateTime<Utc>,
    }

    /// Fields changed by an edit, absent fields are left alone
    #[derive(Default)]
    pub struct PartialPost {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<v0::PostStatus>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub location: Option<v0::Location>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub images: Option<Vec<String>>,
        #[serde(rename = "contactInfo", skip_serializing_if = "Option::is_none")]
        pub contact_info: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub when: Option<bson::DateTime>,
        #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
        pub updated_at: Option<bson::DateTime>,
    }
);

impl Post {
    /// Create a post owned by `author`
    pub async fn create(db: &Database, author: &User, data: v0::DataCreatePost) -> Result<Post> {
        let now = Utc::now();
        let post = Post {
            id: new_id(),
            title: data.title.trim().to_string(),
            description: data.description.trim().to_string(),
            status: data.status,
            category: data.category.unwrap_or_else(default_category),
            location: data.location.map(Into::into),
            images: data.images,
            predicted_items: data.predicted_items.into_iter().map(Into::into).collect(),
            contact_info: data.contact_info.unwrap_or_default(),
            when: data.when.unwrap_or(now),
            user_id: author.id.to_string(),
            repost: vec![],
            created_at: now,
            updated_at: now,
        };

        db.insert_post(&post).await?;
        Ok(post)
    }

    /// Apply an edit
    pub async fn update(&mut self, db: &Database, data: v0::DataEditPost) -> Result<()> {
        let partial = PartialPost {
            title: data.title.map(|title| title.trim().to_string()),
            description: data.description.map(|text| text.trim().to_string()),
            status: data.status,
            category: data.category,
            location: data.location.map(Into::into),
            images: data.images,
            contact_info: data.contact_info,
            when: data.when.map(bson::DateTime::from_chrono),
            updated_at: Some(bson::DateTime::from_chrono(Utc::now())),
        };

        db.update_post(&self.id, &partial).await?;
        self.apply_options(partial);
        Ok(())
    }

    /// Copy set fields of a partial onto this post
    pub fn apply_options(&mut self, partial: PartialPost) {
        if let Some(title) = partial.title {
            self.title = title;
        }
        if let Some(description) = partial.description {
            self.description = description;
        }
        if let Some(status) = partial.status {
            self.status = status;
        }
        if let Some(category) = partial.category {
            self.category = category;
        }
        if let Some(location) = partial.location {
            self.location = Some(location);
        }
        if let Some(images) = partial.images {
            self.images = images;
        }
        if let Some(contact_info) = partial.contact_info {
            self.contact_info = contact_info;
        }
        if let Some(when) = partial.when {
            self.when = when.to_chrono();
        }
        if let Some(updated_at) = partial.updated_at {
            self.updated_at = updated_at.to_chrono();
        }
    }

    /// Record a repost by `user_id`, returns the new repost count
    pub async fn repost(
        db: &Database,
        id: &str,
        user_id: &str,
        policy: RepostPolicy,
    ) -> Result<usize> {
        db.add_repost(id, user_id, policy)
            .await
            .map(|reposts| reposts.len())
    }

    /// Delete the post along with its likes and comments
    pub async fn delete(self, db: &Database) -> Result<()> {
        db.delete_post(&self.id).await?;
        db.delete_likes(&self.id).await?;
        db.delete_comments_for_post(&self.id).await
    }
}

impl From<Post> for v0::Post {
    fn from(value: Post) -> Self {
        v0::Post {
            id: value.id,
            title: value.title,
            description: value.description,
            status: value.status,
            category: value.category,
            location: value.location,
            images: value.images,
            predicted_items: value.predicted_items,
            contact_info: value.contact_info,
            when: value.when,
            user_id: value.user_id,
            repost: value.repost,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use lostfound_config::RepostPolicy;
    use lostfound_models::v0;

    use crate::util::test_fixtures::{create_post, create_user};
    use crate::{Comment, Post};

    #[tokio::test]
    async fn crud() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let mut post = create_post(&db, &author, "Black leather wallet").await;

            let fetched = db.fetch_post(&post.id).await.unwrap();
            assert_eq!(fetched.id, post.id);
            assert_eq!(fetched.user_id, author.id);
            assert_eq!(fetched.category, "other");

            post.update(
                &db,
                v0::DataEditPost {
                    status: Some(v0::PostStatus::Claimed),
                    title: Some("  Wallet  ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

            let fetched = db.fetch_post(&post.id).await.unwrap();
            assert_eq!(fetched.status, v0::PostStatus::Claimed);
            assert_eq!(fetched.title, "Wallet");
            assert_eq!(fetched.description, "Black leather wallet");

            post.delete(&db).await.unwrap();
            assert!(db.fetch_post(&fetched.id).await.is_err());
        });
    }

    #[tokio::test]
    async fn delete_removes_likes_and_comments() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let post = create_post(&db, &author, "Keys with a red tag").await;

            db.toggle_like(&post.id, &author.id).await.unwrap();
            Comment::create(&db, &post.id, &author, "mine!".to_string(), None)
                .await
                .unwrap();

            let id = post.id.clone();
            post.delete(&db).await.unwrap();

            assert!(db.fetch_likers(&id).await.unwrap().is_empty());
            assert_eq!(db.count_comments(&id).await.unwrap(), 0);
        });
    }

    #[tokio::test]
    async fn repost_dedup_policy() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let fan = create_user(&db, "fan").await;
            let post = create_post(&db, &author, "Blue umbrella").await;

            for _ in 0..3 {
                Post::repost(&db, &post.id, &fan.id, RepostPolicy::Dedup)
                    .await
                    .unwrap();
            }

            let count = Post::repost(&db, &post.id, &author.id, RepostPolicy::Dedup)
                .await
                .unwrap();

            assert_eq!(count, 2);
            assert_eq!(db.fetch_post(&post.id).await.unwrap().repost.len(), 2);
        });
    }

    #[tokio::test]
    async fn repost_multiset_policy() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let fan = create_user(&db, "fan").await;
            let post = create_post(&db, &author, "Blue umbrella").await;

            for _ in 0..3 {
                Post::repost(&db, &post.id, &fan.id, RepostPolicy::Multiset)
                    .await
                    .unwrap();
            }

            let post = db.fetch_post(&post.id).await.unwrap();
            assert_eq!(post.repost, vec![fan.id.clone(), fan.id.clone(), fan.id]);
        });
    }

    #[tokio::test]
    async fn repost_unknown_post() {
        database_test!(|db| async move {
            let fan = create_user(&db, "fan").await;
            let err = Post::repost(
                &db,
                "01ARZ3NDEKTSV4RRFFQ69G5FAV",
                &fan.id,
                RepostPolicy::Dedup,
            )
            .await
            .unwrap_err();

            assert!(matches!(
                err.error_type,
                lostfound_result::ErrorType::UnknownPost
            ));
        });
    }
}
