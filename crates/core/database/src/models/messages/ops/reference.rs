use lostfound_result::Result;

use crate::Message;
use crate::ReferenceDb;

use super::AbstractMessages;

#[async_trait]
impl AbstractMessages for ReferenceDb {
    async fn insert_message(&self, message: &Message) -> Result<()> {
        let mut messages = self.messages.lock().await;
        if messages.contains_key(&message.id) {
            Err(create_database_error!("insert", "messages"))
        } else {
            messages.insert(message.id.to_string(), message.clone());
            Ok(())
        }
    }

    async fn fetch_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>> {
        let messages = self.messages.lock().await;
        let mut list: Vec<Message> = messages
            .values()
            .filter(|message| message.from == user_id || message.to == user_id)
            .cloned()
            .collect();

        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn fetch_messages_between(&self, a: &str, b: &str) -> Result<Vec<Message>> {
        let messages = self.messages.lock().await;
        let mut list: Vec<Message> = messages
            .values()
            .filter(|message| {
                (message.from == a && message.to == b) || (message.from == b && message.to == a)
            })
            .cloned()
            .collect();

        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        Ok(list)
    }
}
