//! Fuzzy search over post descriptions and user names
//!
//! Candidates come from a full scan of the collection, ranked in memory by
//! the [`fuzzy`] matcher. Matched posts go through the feed composer in
//! relevance order.
use std::collections::HashMap;

use lostfound_config::Settings;
use lostfound_models::v0;
use lostfound_result::Result;

use crate::feed::{compose_feed, FeedQuery, FeedSelector, DEFAULT_RECENT_COMMENTS};
use crate::Database;

pub mod fuzzy;

pub use fuzzy::{FuzzyMatch, FuzzyMatcher, FuzzyOptions};

/// Searchable text of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub text: String,
}

impl Candidate {
    pub fn new(id: &str, text: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            text: text.to_string(),
        }
    }
}

/// Search entry point shared by the HTTP handlers
#[derive(Clone)]
pub struct SearchService {
    db: Database,
    posts: FuzzyOptions,
    users: FuzzyOptions,
    recent_comments: i64,
}

impl SearchService {
    pub fn new(db: Database, posts: FuzzyOptions, users: FuzzyOptions) -> SearchService {
        SearchService {
            db,
            posts,
            users,
            recent_comments: DEFAULT_RECENT_COMMENTS,
        }
    }

    /// Use the matcher options and feed settings from configuration
    pub fn from_config(db: Database, settings: &Settings) -> SearchService {
        SearchService {
            db,
            posts: (&settings.search.posts).into(),
            users: (&settings.search.users).into(),
            recent_comments: settings.features.recent_comments,
        }
    }

    /// Posts whose description matches `query`, best match first
    pub async fn search_posts(&self, query: &str, requester: &str) -> Result<Vec<v0::FeedPost>> {
        let matcher = FuzzyMatcher::new(query, self.posts);
        let candidates = self.db.fetch_post_descriptions().await?;
        let ranked: Vec<String> = matcher
            .search(&candidates)
            .into_iter()
            .map(|m| m.id)
            .collect();

        debug!("`{query}` matched {} of {} posts", ranked.len(), candidates.len());
        if ranked.is_empty() {
            return Ok(vec![]);
        }

        compose_feed(
            &self.db,
            FeedQuery::new(FeedSelector::ByIds(ranked), requester)
                .recent_comments(self.recent_comments),
        )
        .await
    }

    /// Users whose name matches `query`, best match first
    pub async fn search_users(&self, query: &str) -> Result<Vec<v0::UserSummary>> {
        let matcher = FuzzyMatcher::new(query, self.users);
        let candidates = self.db.fetch_user_names().await?;
        let ranked: Vec<String> = matcher
            .search(&candidates)
            .into_iter()
            .map(|m| m.id)
            .collect();

        if ranked.is_empty() {
            return Ok(vec![]);
        }

        let mut users: HashMap<String, v0::UserSummary> = self
            .db
            .fetch_users(&ranked)
            .await?
            .into_iter()
            .map(|user| (user.id.to_string(), user.into_summary()))
            .collect();

        Ok(ranked.iter().filter_map(|id| users.remove(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use crate::util::test_fixtures::{create_post_at, create_user};
    use crate::{Like, User};

    use super::*;

    fn service(db: &Database) -> SearchService {
        SearchService::new(
            db.clone(),
            FuzzyOptions {
                threshold: 0.4,
                ..Default::default()
            },
            FuzzyOptions {
                threshold: 0.7,
                ignore_location: true,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn posts_rank_by_relevance_not_recency() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let exact = create_post_at(&db, &author, "wallet", Utc::now() - TimeDelta::days(2)).await;
            let partial =
                create_post_at(&db, &author, "found a wallet", Utc::now() - TimeDelta::days(1)).await;
            create_post_at(&db, &author, "iphone charger", Utc::now()).await;

            Like::toggle(&db, &partial.id, &author.id).await.unwrap();

            let results = service(&db).search_posts("wallet", &author.id).await.unwrap();
            let ids: Vec<&str> = results.iter().map(|item| item.post.id.as_str()).collect();
            assert_eq!(ids, vec![exact.id.as_str(), partial.id.as_str()]);

            assert_eq!(results[1].likes_count, 1);
            assert!(results[1].is_liked);
        });
    }

    #[tokio::test]
    async fn no_match_is_empty() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            create_post_at(&db, &author, "red backpack", Utc::now()).await;

            let search = service(&db);
            assert!(search.search_posts("zzzzqqqq", &author.id).await.unwrap().is_empty());
            assert!(search.search_posts("", &author.id).await.unwrap().is_empty());
            assert!(search.search_users("").await.unwrap().is_empty());
        });
    }

    #[tokio::test]
    async fn users_are_summarised_in_rank_order() {
        database_test!(|db| async move {
            let maria = User::create(&db, "Maria Gonzalez", "maria@example.com")
                .await
                .unwrap();
            let mario = User::create(&db, "Mario", "mario@example.com").await.unwrap();
            User::create(&db, "Lost and Found Office", "office@example.com")
                .await
                .unwrap();

            let users = service(&db).search_users("mario").await.unwrap();
            assert_eq!(users.len(), 2);
            assert_eq!(users[0].user_id, mario.id);
            assert_eq!(users[0].email, "mario@example.com");
            assert_eq!(users[1].user_id, maria.id);
        });
    }
}
