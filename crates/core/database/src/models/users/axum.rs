use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use lostfound_config::config;
use lostfound_result::{create_error, Error, Result};

use crate::{util::token, Database, User};

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for User
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<User> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| create_error!(NotAuthenticated))?
            .to_str()
            .map_err(|_| create_error!(InvalidSession))?;

        let bearer = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or_else(|| create_error!(InvalidSession))?;

        let config = config().await;
        let claims = token::decode_token(&config.api.token_secret, bearer.trim())
            .map_err(|_| create_error!(InvalidSession))?;

        let db = Database::from_ref(state);
        db.fetch_user(&claims.sub).await.map_err(|err| {
            if matches!(err.error_type, lostfound_result::ErrorType::UnknownUser) {
                create_error!(InvalidSession)
            } else {
                err
            }
        })
    }
}
