use chrono::{DateTime, Utc};

#[cfg(feature = "validator")]
use validator::Validate;

auto_derived!(
    /// Direct message between two users
    pub struct Message {
        /// Unique Id
        #[cfg_attr(feature = "serde", serde(rename = "_id"))]
        pub id: String,
        /// Sender
        pub from: String,
        /// Recipient
        pub to: String,
        /// Message text
        pub message: String,
        /// When the message was sent
        pub timestamp: DateTime<Utc>,
    }

    /// Messages exchanged with one other user, newest first
    pub struct Conversation {
        /// The other participant
        pub user: String,
        pub messages: Vec<Message>,
    }

    /// New message details
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataSendMessage {
        /// Recipient
        #[cfg_attr(feature = "validator", validate(length(min = 1, max = 64)))]
        pub to: String,
        /// Message text
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 2000), custom(function = "super::validate_not_blank"))
        )]
        pub message: String,
    }
);
