use axum::http::{request::Parts, Method};
use lostfound_config::Ratelimits;
use lostfound_ratelimits::ratelimiter::RatelimitResolver;

/// Buckets requests by the resource family they touch
pub struct DeltaRatelimits {
    limits: Ratelimits,
}

impl From<&Ratelimits> for DeltaRatelimits {
    fn from(limits: &Ratelimits) -> Self {
        DeltaRatelimits {
            limits: limits.clone(),
        }
    }
}

impl RatelimitResolver<Parts> for DeltaRatelimits {
    fn resolve_bucket<'a>(&self, parts: &'a Parts) -> (&'a str, Option<&'a str>) {
        let mut segments = parts.uri.path().trim_matches('/').split_terminator('/');

        let bucket = match (segments.next(), segments.next()) {
            (Some("posts"), Some("description")) | (Some("users"), Some("find")) => "search",
            (Some("posts"), Some(_)) => match segments.next() {
                Some("like") => "likes",
                Some("comments") => "comments",
                _ if parts.method == Method::GET => "any",
                _ => "posts",
            },
            (Some("posts"), None) if parts.method != Method::GET => "posts",
            (Some("comments"), _) => "comments",
            (Some("reports"), _) => "reports",
            (Some("messages"), _) => "messages",
            (Some("statuses"), _) => "statuses",
            (Some("predict"), _) | (Some("notifications"), _) => "predict",
            _ => "any",
        };

        (bucket, None)
    }

    fn resolve_bucket_limit(&self, bucket: &str) -> u32 {
        match bucket {
            "posts" => self.limits.posts,
            "likes" => self.limits.likes,
            "comments" => self.limits.comments,
            "reports" => self.limits.reports,
            "search" => self.limits.search,
            "messages" => self.limits.messages,
            "statuses" => self.limits.statuses,
            "predict" => self.limits.predict,
            _ => self.limits.any,
        }
    }
}

#[cfg(test)]
mod test {
    use axum::http::{Method, Request};
    use lostfound_config::config;
    use lostfound_ratelimits::ratelimiter::RatelimitResolver;

    use super::DeltaRatelimits;

    fn bucket(method: Method, uri: &str) -> String {
        let (parts, _) = Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();

        let resolver = DeltaRatelimits {
            limits: lostfound_config::Ratelimits {
                window_seconds: 10,
                posts: 1,
                likes: 1,
                comments: 1,
                reports: 1,
                search: 1,
                messages: 1,
                statuses: 1,
                predict: 1,
                any: 1,
            },
        };

        resolver.resolve_bucket(&parts).0.to_string()
    }

    #[test]
    fn routes_map_to_buckets() {
        assert_eq!(bucket(Method::GET, "/posts?page=2"), "any");
        assert_eq!(bucket(Method::POST, "/posts"), "posts");
        assert_eq!(bucket(Method::DELETE, "/posts/01H"), "posts");
        assert_eq!(bucket(Method::GET, "/posts/01H"), "any");
        assert_eq!(bucket(Method::POST, "/posts/01H/like"), "likes");
        assert_eq!(bucket(Method::POST, "/posts/01H/comments"), "comments");
        assert_eq!(bucket(Method::GET, "/posts/description/wallet"), "search");
        assert_eq!(bucket(Method::GET, "/users/find/sam"), "search");
        assert_eq!(bucket(Method::GET, "/users/01H"), "any");
        assert_eq!(bucket(Method::POST, "/reports"), "reports");
        assert_eq!(bucket(Method::POST, "/notifications"), "predict");
        assert_eq!(bucket(Method::GET, "/"), "any");
    }

    #[tokio::test]
    async fn limits_come_from_configuration() {
        let settings = config().await;
        let resolver = DeltaRatelimits::from(&settings.ratelimits);

        assert_eq!(resolver.resolve_bucket_limit("reports"), settings.ratelimits.reports);
        assert_eq!(resolver.resolve_bucket_limit("unknown"), settings.ratelimits.any);
    }
}
