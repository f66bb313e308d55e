use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

pub use jsonwebtoken::errors::{Error as JWTError, ErrorKind as JWTErrorKind};

/// Claims carried by tokens from the identity provider
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    #[serde(alias = "_id")]
    pub sub: String,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

/// Sign a token for a user
///
/// Tokens are normally issued by the identity provider, this exists for
/// tooling and tests sharing the same secret.
pub fn encode_token(token_secret: &str, user_id: &str, lifetime: TimeDelta) -> Result<String, JWTError> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + lifetime).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(token_secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry
pub fn decode_token(token_secret: &str, token: &str) -> Result<Claims, JWTError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(token_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}
