auto_derived!(
    /// Public profile embedded next to content a user authored
    pub struct AuthorProfile {
        /// User Id
        #[cfg_attr(feature = "serde", serde(rename = "_id"))]
        pub id: String,
        /// Display name
        pub name: String,
        /// Avatar URL
        pub avatar: String,
    }

    /// User returned by lookups and searches
    pub struct UserSummary {
        /// Display name
        pub name: String,
        /// User Id
        pub user_id: String,
        /// Email address
        pub email: String,
        /// Avatar URL
        pub avatar: String,
    }
);
