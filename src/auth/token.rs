use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppResult;
use crate::types::{Account, Role};

/// Verified claim set carried between requests. Not persisted server-side;
/// validity is purely signature plus expiry at verification time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Owning account id.
    pub sub: i64,
    pub email: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token cannot be parsed or its signature does not verify.
    #[error("malformed token")]
    Malformed,
    /// The token parsed and verified but its expiry instant has passed.
    #[error("expired token")]
    Expired,
}

/// Issues and verifies HS256-signed session tokens.
///
/// There is no revocation list: a token stays valid for its full lifetime
/// regardless of later account changes. Logout is client-side state clearing.
#[derive(Clone)]
pub struct SessionTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionTokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Produces a signed token encoding the account's identity and role,
    /// valid from now until now plus the configured lifetime.
    pub fn issue(&self, account: &Account) -> AppResult<String> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| anyhow::anyhow!("token lifetime overflows the timestamp range"))?;
        let claims = SessionClaims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("failed to sign session token: {}", e))?;
        Ok(token)
    }

    /// Decodes and verifies a token, splitting failures into expired versus
    /// everything else. Expiry is exact: no leeway window.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}
