use std::net::SocketAddr;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{ConnectInfo, FromRef, FromRequestParts, State},
    http::{request::Parts, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    RequestPartsExt,
};
use lostfound_database::{Database, User};
use lostfound_result::create_error;

use crate::ratelimiter::{Ratelimiter, RequestKind};

#[derive(Clone, Copy)]
pub struct AxumRequestKind;

impl RequestKind for AxumRequestKind {
    type R<'a> = Parts;
}

pub type RatelimitStorage = crate::ratelimiter::RatelimitStorage<AxumRequestKind>;

/// Outcome cached on the request so the bucket is only charged once
type Outcome = Result<Ratelimiter, Ratelimiter>;

fn to_ip(parts: &Parts) -> String {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.ip().to_string())
        .unwrap_or_default()
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Ratelimiter
where
    Database: FromRef<S>,
    RatelimitStorage: FromRef<S>,
{
    type Rejection = Ratelimiter;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(outcome) = parts.extensions.get::<Outcome>() {
            return *outcome;
        }

        let storage = RatelimitStorage::from_ref(state);

        let identifier = if let Ok(user) = parts.extract_with_state::<User, _>(state).await {
            user.id
        } else {
            to_ip(parts)
        };

        let (bucket, resource) = storage.resolver.resolve_bucket(parts);
        let limit = storage.resolver.resolve_bucket_limit(bucket);

        let outcome = Ratelimiter::from(
            &storage.map,
            &identifier,
            limit,
            storage.window,
            (bucket, resource),
        );

        if outcome.is_err() {
            info!(
                "Rate limited `{identifier}` in bucket `{bucket}` on {}",
                parts.uri.path()
            );
        }

        parts.extensions.insert(outcome);
        outcome
    }
}

fn header(value: impl ToString) -> HeaderValue {
    HeaderValue::from_str(&value.to_string()).unwrap_or(HeaderValue::from_static("0"))
}

/// Charge the request against its bucket and report the bucket in headers
///
/// Exhausted buckets are answered with `429 Ratelimited` without running the
/// handler.
pub async fn ratelimit_middleware(
    State(database): State<Database>,
    State(ratelimit_storage): State<RatelimitStorage>,
    request: Request<Body>,
    next: Next,
) -> Response {
    #[derive(axum::extract::FromRef)]
    struct TempState {
        database: Database,
        ratelimit_storage: RatelimitStorage,
    }

    let state = TempState {
        database,
        ratelimit_storage,
    };

    let (mut parts, body) = request.into_parts();
    let outcome = Ratelimiter::from_request_parts(&mut parts, &state).await;

    let (mut response, ratelimiter) = match outcome {
        Ok(ratelimiter) => (
            next.run(Request::from_parts(parts, body)).await,
            ratelimiter,
        ),
        Err(ratelimiter) => (create_error!(Ratelimited).into_response(), ratelimiter),
    };

    let Ratelimiter {
        key,
        limit,
        remaining,
        reset,
    } = ratelimiter;

    let headers = response.headers_mut();
    headers.insert(HeaderName::from_static("x-ratelimit-limit"), header(limit));
    headers.insert(HeaderName::from_static("x-ratelimit-bucket"), header(key));
    headers.insert(
        HeaderName::from_static("x-ratelimit-remaining"),
        header(remaining),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-reset-after"),
        header(reset),
    );

    response
}
