use chrono::{DateTime, Utc};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{util::id::new_id, Database, User};

auto_derived!(
    /// Direct message between two users
    pub struct Message {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Sender
        pub from: String,
        /// Recipient
        pub to: String,
        /// Message text
        pub message: String,
        /// When the message was sent
        #[serde(with = "crate::util::iso_bson_chrono")]
        pub timestamp: DateTime<Utc>,
    }
);

impl Message {
    /// Send a message to another existing user
    pub async fn send(db: &Database, sender: &User, data: v0::DataSendMessage) -> Result<Message> {
        if data.to == sender.id {
            return Err(validation_error!(
                InvalidOperation,
                "to",
                "cannot message yourself"
            ));
        }

        let recipient = db.fetch_user(&data.to).await?;
        let message = Message {
            id: new_id(),
            from: sender.id.to_string(),
            to: recipient.id,
            message: data.message.trim().to_string(),
            timestamp: Utc::now(),
        };

        db.insert_message(&message).await?;
        Ok(message)
    }

    /// The participant that is not `user_id`
    pub fn other_participant(&self, user_id: &str) -> &str {
        if self.from == user_id {
            &self.to
        } else {
            &self.from
        }
    }

    /// Every conversation `user_id` takes part in, most recently active first
    pub async fn conversations(db: &Database, user_id: &str) -> Result<Vec<v0::Conversation>> {
        let messages = db.fetch_messages_for_user(user_id).await?;

        let mut conversations: Vec<v0::Conversation> = vec![];
        for message in messages {
            let other = message.other_participant(user_id).to_string();
            match conversations.iter_mut().find(|c| c.user == other) {
                Some(conversation) => conversation.messages.push(message.into()),
                None => conversations.push(v0::Conversation {
                    user: other,
                    messages: vec![message.into()],
                }),
            }
        }

        Ok(conversations)
    }

    /// Messages between two users, only visible to either of them
    pub async fn between(
        db: &Database,
        requester: &User,
        a: &str,
        b: &str,
    ) -> Result<Vec<Message>> {
        if requester.id != a && requester.id != b {
            return Err(create_error!(NotParticipant));
        }

        db.fetch_messages_between(a, b).await
    }
}

impl From<Message> for v0::Message {
    fn from(value: Message) -> Self {
        v0::Message {
            id: value.id,
            from: value.from,
            to: value.to,
            message: value.message,
            timestamp: value.timestamp,
        }
    }
}
