use chrono::{DateTime, Utc};
use lostfound_models::v0;

use crate::util::id::new_id;
use crate::{Database, Post, User};

/// Insert a user with a unique email address
pub async fn create_user(db: &Database, name: &str) -> User {
    User::create(
        db,
        name,
        &format!("{name}.{}@example.com", new_id().to_lowercase()),
    )
    .await
    .expect("user")
}

/// Insert a lost item post by `author`
pub async fn create_post(db: &Database, author: &User, description: &str) -> Post {
    Post::create(
        db,
        author,
        v0::DataCreatePost {
            title: "Item".to_string(),
            description: description.to_string(),
            status: v0::PostStatus::Lost,
            category: None,
            location: None,
            images: vec![],
            predicted_items: vec![],
            contact_info: None,
            when: None,
        },
    )
    .await
    .expect("post")
}

/// Insert a post with a fixed creation time
pub async fn create_post_at(
    db: &Database,
    author: &User,
    description: &str,
    created_at: DateTime<Utc>,
) -> Post {
    let post = Post {
        id: new_id(),
        title: "Item".to_string(),
        description: description.to_string(),
        status: v0::PostStatus::Found,
        category: "other".to_string(),
        location: None,
        images: vec![],
        predicted_items: vec![],
        contact_info: String::new(),
        when: created_at,
        user_id: author.id.to_string(),
        repost: vec![],
        created_at,
        updated_at: created_at,
    };

    db.insert_post(&post).await.expect("post");
    post
}
