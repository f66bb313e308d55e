use chrono::{DateTime, Utc};

#[cfg(feature = "validator")]
use validator::Validate;

use super::AuthorProfile;

auto_derived!(
    /// Ephemeral image status
    pub struct Status {
        /// Unique Id
        #[cfg_attr(feature = "serde", serde(rename = "_id"))]
        pub id: String,
        /// Owner
        #[cfg_attr(feature = "serde", serde(rename = "userId"))]
        pub user_id: String,
        /// Image URL
        pub status: String,
        /// Caption
        pub text: String,
        /// Creation time
        #[cfg_attr(feature = "serde", serde(rename = "createdAt"))]
        pub created_at: DateTime<Utc>,
        /// After this point the status is no longer served
        #[cfg_attr(feature = "serde", serde(rename = "expiresAt"))]
        pub expires_at: DateTime<Utc>,
    }

    /// Status with its owner's public profile
    pub struct StatusWithUser {
        #[cfg_attr(feature = "serde", serde(flatten))]
        pub status: Status,
        pub user: Option<AuthorProfile>,
    }

    /// New status details
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataCreateStatus {
        /// Image URL already uploaded to object storage
        #[cfg_attr(feature = "validator", validate(url))]
        pub status: String,
        /// Caption
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 500), custom(function = "super::validate_not_blank"))
        )]
        pub text: String,
    }
);
