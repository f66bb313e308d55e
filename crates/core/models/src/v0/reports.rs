use chrono::{DateTime, Utc};

#[cfg(feature = "validator")]
use validator::Validate;

auto_derived!(
    /// Kind of content a report targets
    #[derive(Copy, Eq, Hash)]
    #[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
    pub enum ReportType {
        Post,
        Comment,
        User,
    }

    /// All reports filed against one piece of content
    pub struct Report {
        /// Unique Id
        #[cfg_attr(feature = "serde", serde(rename = "_id"))]
        pub id: String,
        /// Kind of content
        #[cfg_attr(feature = "serde", serde(rename = "type"))]
        pub kind: ReportType,
        /// Id of the reported content
        #[cfg_attr(feature = "serde", serde(rename = "id"))]
        pub target_id: String,
        /// Users who filed a report, in filing order
        #[cfg_attr(feature = "serde", serde(rename = "usersIDS"))]
        pub users_ids: Vec<String>,
        /// One reason per report
        pub reason: Vec<String>,
        /// One description per report
        pub description: Vec<String>,
        /// When the first report was filed
        #[cfg_attr(feature = "serde", serde(rename = "createdAt"))]
        pub created_at: DateTime<Utc>,
    }

    /// New report details
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataReportContent {
        /// Kind of content
        #[cfg_attr(feature = "serde", serde(rename = "type"))]
        pub kind: ReportType,
        /// Id of the reported content
        #[cfg_attr(feature = "serde", serde(rename = "id"))]
        #[cfg_attr(feature = "validator", validate(length(min = 1, max = 64)))]
        pub target_id: String,
        /// Short reason
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 128), custom(function = "super::validate_not_blank"))
        )]
        pub reason: String,
        /// Additional context
        #[cfg_attr(feature = "serde", serde(default))]
        #[cfg_attr(feature = "validator", validate(length(max = 1000)))]
        pub description: String,
    }
);
