/**
 * Token Service
 *
 * Issues and verifies the signed identity tokens used for bearer
 * authentication. A token encodes `{sub, role, iat, exp}` and is signed
 * (HS256) with the server-held secret; verification checks signature
 * integrity and expiry and nothing else. Two tokens for the same identity
 * are unrelated — there is no session table.
 */

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Identity;
use crate::resources::user::model::Role;

/// Fixed expiry horizon for issued tokens.
pub const TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signed token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id
    pub sub: String,
    /// Identity role
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Tampered, malformed, or expired token.
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// The subject claim is not a document id.
    #[error("malformed token subject")]
    Subject(#[from] uuid::Error),
}

/// Issues and verifies identity tokens against one process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: TOKEN_TTL,
        }
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Encode and sign a token for an identity.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let iat = Self::now();
        let claims = Claims {
            sub: identity.id.to_string(),
            role: identity.role,
            iat,
            exp: iat + self.ttl.as_secs(),
        };

        let key = EncodingKey::from_secret(self.secret.as_ref());
        Ok(encode(&Header::default(), &claims, &key)?)
    }

    /// Verify signature and expiry, then resolve the encoded identity.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::default();

        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(Identity {
            id: Uuid::parse_str(&data.claims.sub)?,
            role: data.claims.role,
        })
    }
}
