use std::{collections::HashMap, sync::Arc};

use futures::lock::Mutex;

use crate::{Comment, Like, Message, Post, Report, Status, User};

database_derived!(
    /// Reference implementation
    #[derive(Default)]
    pub struct ReferenceDb {
        pub users: Arc<Mutex<HashMap<String, User>>>,
        pub posts: Arc<Mutex<HashMap<String, Post>>>,
        /// Keyed by post id
        pub likes: Arc<Mutex<HashMap<String, Like>>>,
        pub comments: Arc<Mutex<HashMap<String, Comment>>>,
        pub reports: Arc<Mutex<HashMap<String, Report>>>,
        pub statuses: Arc<Mutex<HashMap<String, Status>>>,
        pub messages: Arc<Mutex<HashMap<String, Message>>>,
    }
);

impl ReferenceDb {
    /// Empty every collection
    pub async fn clear(&self) {
        self.users.lock().await.clear();
        self.posts.lock().await.clear();
        self.likes.lock().await.clear();
        self.comments.lock().await.clear();
        self.reports.lock().await.clear();
        self.statuses.lock().await.clear();
        self.messages.lock().await.clear();
    }
}
