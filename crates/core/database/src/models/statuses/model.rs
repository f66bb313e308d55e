use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{util::id::new_id, Database, User};

auto_derived!(
    /// Ephemeral image status
    pub struct Status {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Owner
        #[serde(rename = "userId")]
        pub user_id: String,
        /// Image URL
        pub status: String,
        /// Caption
        pub text: String,
        /// Creation time
        #[serde(rename = "createdAt", with = "crate::util::iso_bson_chrono")]
        pub created_at: DateTime<Utc>,
        /// Removed from listings after this point
        #[serde(rename = "expiresAt", with = "crate::util::iso_bson_chrono")]
        pub expires_at: DateTime<Utc>,
    }
);

impl Status {
    /// Post a status, a user holds at most one active status
    pub async fn create(
        db: &Database,
        owner: &User,
        data: v0::DataCreateStatus,
        lifetime: TimeDelta,
    ) -> Result<Status> {
        let now = Utc::now();
        let status = Status {
            id: new_id(),
            user_id: owner.id.to_string(),
            status: data.status,
            text: data.text.trim().to_string(),
            created_at: now,
            expires_at: now + lifetime,
        };

        db.insert_status(&status).await?;
        Ok(status)
    }

    /// Whether the status is still served at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Delete the status, owner only
    pub async fn delete(self, db: &Database, requester: &User) -> Result<()> {
        if self.user_id != requester.id {
            return Err(create_error!(NotOwner));
        }

        db.delete_status(&self.id).await
    }

    /// Attach owner profiles, statuses of deleted users keep `user = null`
    pub async fn with_users(
        db: &Database,
        statuses: Vec<Status>,
    ) -> Result<Vec<v0::StatusWithUser>> {
        let mut ids: Vec<String> = statuses.iter().map(|s| s.user_id.to_string()).collect();
        ids.sort();
        ids.dedup();

        let users: HashMap<String, v0::AuthorProfile> = db
            .fetch_users(&ids)
            .await?
            .into_iter()
            .map(|user| (user.id.to_string(), user.into_author_profile()))
            .collect();

        Ok(statuses
            .into_iter()
            .map(|status| v0::StatusWithUser {
                user: users.get(&status.user_id).cloned(),
                status: status.into(),
            })
            .collect())
    }
}

impl From<Status> for v0::Status {
    fn from(value: Status) -> Self {
        v0::Status {
            id: value.id,
            user_id: value.user_id,
            status: value.status,
            text: value.text,
            created_at: value.created_at,
            expires_at: value.expires_at,
        }
    }
}
