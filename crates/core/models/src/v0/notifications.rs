#[cfg(feature = "validator")]
use validator::Validate;

auto_derived!(
    /// Broadcast notification
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataNotification {
        /// Heading
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 128), custom(function = "super::validate_not_blank"))
        )]
        pub title: String,
        /// Body
        #[cfg_attr(
            feature = "validator",
            validate(length(max = 1024), custom(function = "super::validate_not_blank"))
        )]
        pub message: String,
    }

    /// Push provider acknowledgement
    #[derive(Default)]
    pub struct NotificationReceipt {
        /// Provider side id of the notification
        #[cfg_attr(feature = "serde", serde(default))]
        pub id: Option<String>,
        /// Number of devices it was delivered to
        #[cfg_attr(feature = "serde", serde(default))]
        pub recipients: Option<u64>,
    }
);
