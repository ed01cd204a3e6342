//! Session Tokens
//!
//! Stateless HS256 JWTs binding a user id. The signing secret is loaded once
//! at start-up and carried in [`TokenService`]; nothing here reads the
//! environment.
//!
//! Tokens carry no expiry, so a token stays valid until the secret is
//! rotated. If a token does carry an `exp` claim it is honoured.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

/// Outcome of a failed issue or verification
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, bad encoding, or an identifier that is not a user id
    #[error("{0}")]
    Malformed(String),

    /// Token carried an `exp` claim that has passed
    #[error("Access token has expired")]
    Expired,

    /// Token decoded but carries no user id
    #[error("Invalid Access token supplied")]
    MissingClaim,

    /// Token could not be created
    #[error("failed to sign token: {0}")]
    Signing(String),
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies session tokens with a process-wide secret
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
        }
    }

    /// Create a token for a user
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let claims = Claims {
            user_id: Some(user_id.to_string()),
            iat: Utc::now().timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return the user id it binds
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        let user_id = data
            .claims
            .user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(TokenError::MissingClaim)?;

        Uuid::parse_str(&user_id)
            .map_err(|e| TokenError::Malformed(format!("Invalid user id in token: {}", e)))
    }
}
