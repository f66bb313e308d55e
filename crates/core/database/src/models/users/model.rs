use chrono::{DateTime, Utc};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{util::id::new_id, Database};

/// Avatar assigned to users who never uploaded one
pub static DEFAULT_AVATAR: &str = "/image/2024.png";

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

auto_derived!(
    /// Registered user
    ///
    /// Accounts are created by the identity provider, this service only reads
    /// them (tests insert their own).
    pub struct User {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Display name
        pub name: String,
        /// Email address
        pub email: String,
        /// Password hash
        #[serde(default)]
        pub password: String,
        /// Avatar URL
        #[serde(default = "default_avatar")]
        pub avatar: String,
        /// Last issued session token
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub token: Option<String>,
        /// Pending email verification code
        #[serde(
            rename = "verificationCode",
            skip_serializing_if = "Option::is_none",
            default
        )]
        pub verification_code: Option<String>,
        /// Whether the email address was verified
        #[serde(default)]
        pub verified: bool,
        /// Creation time
        #[serde(rename = "createdAt", with = "crate::util::iso_bson_chrono")]
        pub created_at: DateTime<Utc>,
        /// Last change
        #[serde(rename = "updatedAt", with = "crate::util::iso_bson_chrono")]
        pub updated_at: DateTime<Utc>,
    }
);

impl User {
    /// Insert a new user
    pub async fn create(db: &Database, name: &str, email: &str) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: new_id(),
            name: name.to_string(),
            email: email.to_lowercase(),
            password: String::new(),
            avatar: default_avatar(),
            token: None,
            verification_code: None,
            verified: false,
            created_at: now,
            updated_at: now,
        };

        db.insert_user(&user).await?;
        Ok(user)
    }

    /// Lookup and search result
    pub fn into_summary(self) -> v0::UserSummary {
        v0::UserSummary {
            name: self.name,
            user_id: self.id,
            email: self.email,
            avatar: self.avatar,
        }
    }

    /// Public profile shown next to content
    pub fn into_author_profile(self) -> v0::AuthorProfile {
        v0::AuthorProfile {
            id: self.id,
            name: self.name,
            avatar: self.avatar,
        }
    }
}
