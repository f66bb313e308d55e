use chrono::{DateTime, Utc};

#[cfg(feature = "validator")]
use validator::Validate;

use super::{AuthorProfile, Comment};

auto_derived!(
    /// Lifecycle state of an item listing
    #[derive(Copy, Eq, Hash)]
    #[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
    pub enum PostStatus {
        /// Someone lost this item
        Lost,
        /// Someone found this item
        Found,
        /// The item went back to its owner
        Claimed,
    }

    /// GeoJSON point with a human readable name
    pub struct Location {
        /// Always `Point`
        #[cfg_attr(feature = "serde", serde(rename = "type", default = "default_point"))]
        pub kind: String,
        /// `[longitude, latitude]`
        pub coordinates: Vec<f64>,
        /// Place name shown to users
        #[cfg_attr(feature = "serde", serde(rename = "placeName", default))]
        pub place_name: String,
    }

    /// Label suggested by the image classifier
    pub struct PredictedItem {
        /// Predicted label
        pub label: String,
        /// Confidence between 0 and 1
        pub confidence: f64,
        /// Category the label belongs to
        #[cfg_attr(feature = "serde", serde(default = "default_category"))]
        pub category: String,
    }

    /// Lost or found item listing
    pub struct Post {
        /// Unique Id
        #[cfg_attr(feature = "serde", serde(rename = "_id"))]
        pub id: String,
        /// Short title
        pub title: String,
        /// Free text description
        pub description: String,
        /// Item status
        pub status: PostStatus,
        /// Item category
        pub category: String,
        /// Where the item was lost or found
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        pub location: Option<Location>,
        /// Image URLs in display order
        #[cfg_attr(feature = "serde", serde(default))]
        pub images: Vec<String>,
        /// Labels suggested by the classifier
        #[cfg_attr(feature = "serde", serde(rename = "predictedItems", default))]
        pub predicted_items: Vec<PredictedItem>,
        /// How to reach the author
        #[cfg_attr(feature = "serde", serde(rename = "contactInfo", default))]
        pub contact_info: String,
        /// When the item was lost or found
        pub when: DateTime<Utc>,
        /// Id of the author
        pub user_id: String,
        /// Ids of users who reposted this post
        #[cfg_attr(feature = "serde", serde(default))]
        pub repost: Vec<String>,
        /// Creation time
        #[cfg_attr(feature = "serde", serde(rename = "createdAt"))]
        pub created_at: DateTime<Utc>,
        /// Last edit time
        #[cfg_attr(feature = "serde", serde(rename = "updatedAt"))]
        pub updated_at: DateTime<Utc>,
    }

    /// Post together with its author, like state, comments and reposts
    pub struct FeedPost {
        /// Base post
        #[cfg_attr(feature = "serde", serde(flatten))]
        pub post: Post,
        /// Public profile of the author, absent if the author was removed
        pub user: Option<AuthorProfile>,
        /// Number of distinct users who liked the post
        #[cfg_attr(feature = "serde", serde(rename = "likesCount"))]
        pub likes_count: usize,
        /// Whether the requesting user liked the post
        #[cfg_attr(feature = "serde", serde(rename = "isLiked"))]
        pub is_liked: bool,
        /// Total number of comments
        #[cfg_attr(feature = "serde", serde(rename = "commentsCount"))]
        pub comments_count: usize,
        /// Newest comments, newest first
        #[cfg_attr(feature = "serde", serde(rename = "recentComments", default))]
        pub recent_comments: Vec<Comment>,
        /// Number of entries in the repost list
        #[cfg_attr(feature = "serde", serde(rename = "repostsCount"))]
        pub reposts_count: usize,
    }

    /// Location details for a new post
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataLocation {
        /// `[longitude, latitude]`
        #[cfg_attr(
            feature = "validator",
            validate(custom(function = "super::validate_coordinates"))
        )]
        pub coordinates: Vec<f64>,
        /// Place name shown to users
        #[cfg_attr(feature = "serde", serde(rename = "placeName", default))]
        #[cfg_attr(feature = "validator", validate(length(max = 256)))]
        pub place_name: String,
    }

    /// Classifier label attached to a new post
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataPredictedItem {
        #[cfg_attr(feature = "validator", validate(length(min = 1, max = 128)))]
        pub label: String,
        #[cfg_attr(feature = "validator", validate(range(min = 0.0, max = 1.0)))]
        pub confidence: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        pub category: Option<String>,
    }

    /// New post details
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataCreatePost {
        /// Short title
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 200), custom(function = "super::validate_not_blank"))
        )]
        pub title: String,
        /// Free text description
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 4000), custom(function = "super::validate_not_blank"))
        )]
        pub description: String,
        /// Item status
        pub status: PostStatus,
        /// Item category, `other` when omitted
        #[cfg_attr(feature = "validator", validate(length(min = 1, max = 64)))]
        pub category: Option<String>,
        /// Where the item was lost or found
        #[cfg_attr(feature = "validator", validate(nested))]
        pub location: Option<DataLocation>,
        /// Image URLs already uploaded to object storage
        #[cfg_attr(feature = "serde", serde(default))]
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 10), custom(function = "super::validate_urls"))
        )]
        pub images: Vec<String>,
        /// Labels suggested by the classifier
        #[cfg_attr(feature = "serde", serde(rename = "predictedItems", default))]
        #[cfg_attr(feature = "validator", validate(nested))]
        pub predicted_items: Vec<DataPredictedItem>,
        /// How to reach the author
        #[cfg_attr(feature = "serde", serde(rename = "contactInfo", default))]
        #[cfg_attr(feature = "validator", validate(length(max = 256)))]
        pub contact_info: Option<String>,
        /// When the item was lost or found, defaults to now
        #[cfg_attr(feature = "serde", serde(default))]
        pub when: Option<DateTime<Utc>>,
    }

    /// Changes to an existing post
    #[derive(Default)]
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataEditPost {
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 200), custom(function = "super::validate_not_blank"))
        )]
        pub title: Option<String>,
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 4000), custom(function = "super::validate_not_blank"))
        )]
        pub description: Option<String>,
        pub status: Option<PostStatus>,
        #[cfg_attr(feature = "validator", validate(length(min = 1, max = 64)))]
        pub category: Option<String>,
        #[cfg_attr(feature = "validator", validate(nested))]
        pub location: Option<DataLocation>,
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 10), custom(function = "super::validate_urls"))
        )]
        pub images: Option<Vec<String>>,
        #[cfg_attr(feature = "serde", serde(rename = "contactInfo"))]
        #[cfg_attr(feature = "validator", validate(length(max = 256)))]
        pub contact_info: Option<String>,
        pub when: Option<DateTime<Utc>>,
    }
);

#[cfg(feature = "serde")]
fn default_point() -> String {
    "Point".to_string()
}

#[cfg(feature = "serde")]
fn default_category() -> String {
    "other".to_string()
}

impl From<DataLocation> for Location {
    fn from(value: DataLocation) -> Self {
        Location {
            kind: "Point".to_string(),
            coordinates: value.coordinates,
            place_name: value.place_name,
        }
    }
}

impl From<DataPredictedItem> for PredictedItem {
    fn from(value: DataPredictedItem) -> Self {
        PredictedItem {
            label: value.label,
            confidence: value.confidence,
            category: value.category.unwrap_or_else(|| "other".to_string()),
        }
    }
}
