use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::JwtConfig;

/// Claim set carried by a session token: one subject claim plus zero or more
/// role claims, bounded by issued-at and expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header cannot be found.")]
    MissingCredential,

    #[error("Authorization header does not carry a token.")]
    MalformedCredential,

    /// Signature, issuer, audience, and expiry failures all collapse here;
    /// callers are not told which check rejected the token.
    #[error("Token is invalid.")]
    InvalidToken,

    #[error("Token generation error: {0}")]
    TokenGeneration(String),
}

/// Verified identity extracted from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: Uuid,
    pub roles: Vec<String>,
}

/// Issues and validates signed session tokens (HS256 over a shared secret).
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::minutes(config.expiry_minutes),
        }
    }

    /// Issue a token for `user_id` carrying one role claim per role string.
    /// An empty role list is legal and produces a token with no role claims.
    pub fn issue(&self, user_id: Uuid, roles: &[String]) -> Result<String, AuthError> {
        self.issue_at(user_id, roles, Utc::now())
    }

    /// Issue a token as of an explicit clock reading. Exercised directly by
    /// expiry tests; `issue` is the production entry point.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        roles: &[String],
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            roles: roles.to_vec(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Verify signature, issuer, audience, and expiry, then extract the
    /// subject and role claims.
    pub fn validate(&self, token: &str) -> Result<TokenIdentity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })?;

        let user_id = token_data
            .claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(TokenIdentity {
            user_id,
            roles: token_data.claims.roles,
        })
    }
}
