auto_derived!(
    /// Like state of a post right after a toggle
    pub struct LikeState {
        /// Number of users who like the post
        pub count: usize,
        /// Users who like the post
        #[cfg_attr(feature = "serde", serde(rename = "usersIDs"))]
        pub users_ids: Vec<String>,
        /// Whether the requesting user likes the post
        #[cfg_attr(feature = "serde", serde(rename = "isLiked"))]
        pub is_liked: bool,
    }

    /// One page of the users who like a post
    pub struct LikeMembers {
        /// Number of users who like the post
        pub count: usize,
        /// Users on this page
        #[cfg_attr(feature = "serde", serde(rename = "usersIDs"))]
        pub users_ids: Vec<String>,
        /// Whether the requesting user likes the post
        #[cfg_attr(feature = "serde", serde(rename = "isLiked"))]
        pub is_liked: bool,
        /// Page number, starting at 1
        pub page: i64,
        /// Page size
        pub limit: i64,
    }
);
