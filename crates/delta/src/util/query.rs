use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use lostfound_result::{validation_error, Error};
use serde::de::DeserializeOwned;

/// Query string that rejects with the service's error shape
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::try_from_uri(&parts.uri)
            .map(|axum::extract::Query(value)| Query(value))
            .map_err(|rejection| validation_error!(FailedValidation, "query", rejection.body_text()))
    }
}
