use lostfound_result::Result;

use crate::Message;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractMessages: Sync + Send {
    /// Insert a new message into the database
    async fn insert_message(&self, message: &Message) -> Result<()>;

    /// Fetch every message sent or received by a user, newest first
    async fn fetch_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>>;

    /// Fetch the messages exchanged by two users, newest first
    async fn fetch_messages_between(&self, a: &str, b: &str) -> Result<Vec<Message>>;
}
