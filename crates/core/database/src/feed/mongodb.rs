use bson::{Bson, Document};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{Comment, MongoDb, Post, DEFAULT_AVATAR};

use super::{feed_pipeline, AbstractFeed, FeedQuery};

static COL: &str = "posts";

/// Read a count however the server chose to encode it
fn count(document: &Document, key: &str) -> usize {
    match document.get(key) {
        Some(Bson::Int32(value)) => (*value).max(0) as usize,
        Some(Bson::Int64(value)) => (*value).max(0) as usize,
        Some(Bson::Double(value)) => value.max(0.0) as usize,
        _ => 0,
    }
}

fn author_profile(document: &Document) -> Option<v0::AuthorProfile> {
    Some(v0::AuthorProfile {
        id: document.get_str("_id").ok()?.to_string(),
        name: document.get_str("name").unwrap_or_default().to_string(),
        avatar: document
            .get_str("avatar")
            .unwrap_or(DEFAULT_AVATAR)
            .to_string(),
    })
}

/// Split an aggregated document back into a post and its enrichment
fn into_feed_post(mut document: Document) -> Result<v0::FeedPost> {
    let user = document
        .remove("user")
        .and_then(|user| match user {
            Bson::Document(user) => author_profile(&user),
            _ => None,
        });

    let likes_count = count(&document, "likesCount");
    let comments_count = count(&document, "commentsCount");
    let reposts_count = count(&document, "repostsCount");
    let is_liked = document.get_bool("isLiked").unwrap_or_default();

    let recent_comments = match document.remove("recentComments") {
        Some(Bson::Array(comments)) => comments
            .into_iter()
            .map(|comment| {
                bson::from_bson::<Comment>(comment)
                    .map(Into::into)
                    .map_err(|_| create_database_error!("aggregate", "comments"))
            })
            .collect::<Result<Vec<v0::Comment>>>()?,
        _ => vec![],
    };

    for key in ["likesCount", "commentsCount", "repostsCount", "isLiked"] {
        document.remove(key);
    }

    let post: Post = bson::from_document(document)
        .map_err(|_| create_database_error!("aggregate", COL))?;

    Ok(v0::FeedPost {
        post: post.into(),
        user,
        likes_count,
        is_liked,
        comments_count,
        recent_comments,
        reposts_count,
    })
}

#[async_trait]
impl AbstractFeed for MongoDb {
    async fn fetch_feed(&self, query: &FeedQuery) -> Result<Vec<v0::FeedPost>> {
        self.aggregate(COL, feed_pipeline(query))
            .await?
            .into_iter()
            .map(into_feed_post)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn splits_enrichment_from_post() {
        let document = doc! {
            "_id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "title": "Item",
            "description": "Lost keys",
            "status": "lost",
            "category": "other",
            "images": [],
            "predictedItems": [],
            "contactInfo": "",
            "when": bson::DateTime::now(),
            "user_id": "01ARZ3NDEKTSV4RRFFQ69G5FAW",
            "repost": ["a"],
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
            "user": { "_id": "01ARZ3NDEKTSV4RRFFQ69G5FAW", "name": "author" },
            "likesCount": 3_i32,
            "isLiked": true,
            "commentsCount": 0_i32,
            "recentComments": [],
            "repostsCount": 1_i32,
        };

        let item = into_feed_post(document).unwrap();
        assert_eq!(item.likes_count, 3);
        assert!(item.is_liked);
        assert_eq!(item.reposts_count, 1);
        assert_eq!(item.post.description, "Lost keys");
        assert_eq!(item.user.unwrap().avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn missing_author_is_none() {
        let document = doc! {
            "_id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "title": "Item",
            "description": "Lost keys",
            "status": "found",
            "when": bson::DateTime::now(),
            "user_id": "gone",
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
        };

        let item = into_feed_post(document).unwrap();
        assert!(item.user.is_none());
        assert_eq!(item.likes_count, 0);
        assert!(!item.is_liked);
    }
}
