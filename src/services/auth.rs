use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub phone: String,
    /// "access" or "refresh".
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,

    #[error("token expired")]
    Expired,

    #[error("wrong token type: expected {expected}")]
    WrongType { expected: &'static str },
}

/// HS256 token issuer/verifier shared through `AppState`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl_minutes: i64, refresh_ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_ttl_minutes),
            refresh_ttl: Duration::days(refresh_ttl_days),
        }
    }

    pub fn issue_pair(&self, user: &User) -> anyhow::Result<TokenPair> {
        Ok(TokenPair {
            access: self.issue(user, "access", self.access_ttl)?,
            refresh: self.issue(user, "refresh", self.refresh_ttl)?,
        })
    }

    fn issue(&self, user: &User, token_type: &str, ttl: Duration) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            phone: user.phone_number.clone(),
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validates a bearer token and checks it is an access token; refresh
    /// tokens are not accepted on authenticated endpoints.
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        if data.claims.token_type != "access" {
            return Err(TokenError::WrongType { expected: "access" });
        }
        Ok(data.claims)
    }
}
