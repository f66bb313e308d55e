use chrono::{DateTime, Utc};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{util::pagination::Pagination, Database};

auto_derived!(
    /// Users who like a post, one document per post
    pub struct Like {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Liked post
        #[serde(rename = "postId")]
        pub post_id: String,
        /// Users who like the post
        #[serde(rename = "usersIDs", default)]
        pub users_ids: Vec<String>,
        /// When the first like happened
        #[serde(rename = "createdAt", with = "crate::util::iso_bson_chrono")]
        pub created_at: DateTime<Utc>,
    }
);

impl Like {
    /// Flip whether `user_id` likes the post
    pub async fn toggle(db: &Database, post_id: &str, user_id: &str) -> Result<v0::LikeState> {
        db.fetch_post(post_id).await?;

        let users_ids = db.toggle_like(post_id, user_id).await?;
        Ok(v0::LikeState {
            count: users_ids.len(),
            is_liked: users_ids.iter().any(|id| id == user_id),
            users_ids,
        })
    }

    /// One page of the users who like a post
    pub async fn members(
        db: &Database,
        post_id: &str,
        requester: &str,
        pagination: Pagination,
    ) -> Result<v0::LikeMembers> {
        db.fetch_post(post_id).await?;

        let likers = db.fetch_likers(post_id).await?;
        Ok(v0::LikeMembers {
            count: likers.len(),
            is_liked: likers.iter().any(|id| id == requester),
            users_ids: pagination.slice(likers),
            page: pagination.page,
            limit: pagination.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::future::join_all;

    use crate::util::pagination::Pagination;
    use crate::util::test_fixtures::{create_post, create_user};
    use crate::Like;

    #[tokio::test]
    async fn toggle_twice_restores_state() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let liker = create_user(&db, "liker").await;
            let post = create_post(&db, &author, "Green scarf").await;

            Like::toggle(&db, &post.id, &author.id).await.unwrap();

            let liked = Like::toggle(&db, &post.id, &liker.id).await.unwrap();
            assert_eq!(liked.count, 2);
            assert!(liked.is_liked);

            let unliked = Like::toggle(&db, &post.id, &liker.id).await.unwrap();
            assert_eq!(unliked.count, 1);
            assert!(!unliked.is_liked);
            assert_eq!(unliked.users_ids, vec![author.id.clone()]);
        });
    }

    #[tokio::test]
    async fn concurrent_toggles_never_duplicate() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let post = create_post(&db, &author, "Silver ring").await;

            for n in [1usize, 2, 7, 16] {
                let before = db.fetch_likers(&post.id).await.unwrap().len();
                assert_eq!(before, 0);

                let results = join_all(
                    (0..n).map(|_| Like::toggle(&db, &post.id, &author.id)),
                )
                .await;
                assert!(results.iter().all(|r| r.is_ok()));

                let likers = db.fetch_likers(&post.id).await.unwrap();
                assert_eq!(likers.len(), n % 2);

                // reset for the next round
                if likers.len() == 1 {
                    Like::toggle(&db, &post.id, &author.id).await.unwrap();
                }
            }
        });
    }

    #[tokio::test]
    async fn concurrent_toggles_across_tasks() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let post = create_post(&db, &author, "Silver ring").await;

            let handles: Vec<_> = (0..10)
                .map(|_| {
                    let db = db.clone();
                    let post = post.id.clone();
                    let user = author.id.clone();
                    tokio::spawn(async move { Like::toggle(&db, &post, &user).await })
                })
                .collect();

            for handle in handles {
                handle.await.unwrap().unwrap();
            }

            let likers = db.fetch_likers(&post.id).await.unwrap();
            assert!(likers.is_empty());
        });
    }

    #[tokio::test]
    async fn members_are_paginated() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let post = create_post(&db, &author, "Guitar case").await;

            let mut users = vec![];
            for i in 0..5 {
                let user = create_user(&db, &format!("user{i}")).await;
                Like::toggle(&db, &post.id, &user.id).await.unwrap();
                users.push(user.id);
            }

            let page = Like::members(&db, &post.id, &users[0], Pagination::new(2, 2).unwrap())
                .await
                .unwrap();

            assert_eq!(page.count, 5);
            assert!(page.is_liked);
            assert_eq!(page.users_ids, users[2..4].to_vec());

            let page = Like::members(&db, &post.id, &author.id, Pagination::new(3, 2).unwrap())
                .await
                .unwrap();
            assert!(!page.is_liked);
            assert_eq!(page.users_ids, users[4..].to_vec());
        });
    }

    #[tokio::test]
    async fn unknown_post() {
        database_test!(|db| async move {
            let user = create_user(&db, "user").await;
            assert!(Like::toggle(&db, "01ARZ3NDEKTSV4RRFFQ69G5FAV", &user.id)
                .await
                .is_err());
        });
    }
}
