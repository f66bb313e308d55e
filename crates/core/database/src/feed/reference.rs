use futures::future::try_join_all;
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{AbstractComments, AbstractLikes, Post, ReferenceDb};

use super::{AbstractFeed, FeedQuery, FeedSelector};

impl ReferenceDb {
    /// Pick the posts of a feed in feed order
    async fn select_posts(&self, query: &FeedQuery) -> Vec<Post> {
        let posts = self.posts.lock().await;

        let mut selected: Vec<Post> = match &query.selector {
            FeedSelector::ById(id) => posts.get(id).cloned().into_iter().collect(),
            FeedSelector::ByIds(ids) => ids.iter().filter_map(|id| posts.get(id).cloned()).collect(),
            FeedSelector::All => posts.values().cloned().collect(),
            FeedSelector::ByAuthor(user_id) => posts
                .values()
                .filter(|post| &post.user_id == user_id)
                .cloned()
                .collect(),
            FeedSelector::RepostedBy(user_id) => posts
                .values()
                .filter(|post| post.repost.contains(user_id))
                .cloned()
                .collect(),
        };

        if !matches!(query.selector, FeedSelector::ByIds(_)) {
            selected.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            });
        }

        match query.pagination {
            Some(pagination) => pagination.slice(selected),
            None => selected,
        }
    }

    async fn author_profile(&self, user_id: &str) -> Result<Option<v0::AuthorProfile>> {
        let users = self.users.lock().await;
        Ok(users
            .get(user_id)
            .cloned()
            .map(|user| user.into_author_profile()))
    }

    async fn enrich(&self, post: Post, query: &FeedQuery) -> Result<v0::FeedPost> {
        let (user, likers, comments_count, recent_comments) = futures::try_join!(
            self.author_profile(&post.user_id),
            self.fetch_likers(&post.id),
            self.count_comments(&post.id),
            self.fetch_recent_comments(&post.id, query.recent_comments),
        )?;

        Ok(v0::FeedPost {
            user,
            likes_count: likers.len(),
            is_liked: likers.contains(&query.requester),
            comments_count,
            recent_comments: recent_comments.into_iter().map(Into::into).collect(),
            reposts_count: post.repost.len(),
            post: post.into(),
        })
    }
}

#[async_trait]
impl AbstractFeed for ReferenceDb {
    async fn fetch_feed(&self, query: &FeedQuery) -> Result<Vec<v0::FeedPost>> {
        let posts = self.select_posts(query).await;
        try_join_all(posts.into_iter().map(|post| self.enrich(post, query))).await
    }
}
