use chrono::{DateTime, Utc};

#[cfg(feature = "validator")]
use validator::Validate;

auto_derived!(
    /// Comment on a post, or a reply to another comment
    pub struct Comment {
        /// Unique Id
        #[cfg_attr(feature = "serde", serde(rename = "_id"))]
        pub id: String,
        /// Post this comment belongs to
        #[cfg_attr(feature = "serde", serde(rename = "postId"))]
        pub post_id: String,
        /// Author
        #[cfg_attr(feature = "serde", serde(rename = "userId"))]
        pub user_id: String,
        /// Comment text
        pub comment: String,
        /// Comment this one replies to
        #[cfg_attr(
            feature = "serde",
            serde(rename = "parentCommentId", skip_serializing_if = "Option::is_none", default)
        )]
        pub parent_comment_id: Option<String>,
        /// Creation time
        #[cfg_attr(feature = "serde", serde(rename = "createdAt"))]
        pub created_at: DateTime<Utc>,
    }

    /// Comment text for a new comment, reply or edit
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataComment {
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 2000), custom(function = "super::validate_not_blank"))
        )]
        pub comment: String,
    }
);
