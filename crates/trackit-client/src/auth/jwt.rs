/*
[INPUT]:  Bearer tokens issued by login/register
[OUTPUT]: Token retrieval and expiration status
[POS]:    Auth layer - token lifecycle management
[UPDATE]: When adding token refresh or changing claim handling
*/

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::User;

/// Lifetime assumed for tokens whose `exp` claim cannot be read.
/// The TrackIt backend issues 24 hour tokens.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Stored token data with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl TokenData {
    /// Build token data, reading the expiry from the token's `exp` claim when present
    pub fn new(token: String, user: User) -> Self {
        let expires_at = expiry_from_claims(&token)
            .unwrap_or_else(|| Utc::now() + Duration::hours(DEFAULT_TOKEN_TTL_HOURS));
        Self {
            token,
            expires_at,
            user,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Thread-safe bearer token store shared by every client clone
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl TokenStore {
    /// Create a new empty token store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new token
    pub fn set(&self, data: TokenData) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(data);
    }

    /// Get the current token if available and not expired
    pub fn get_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|data| !data.is_expired())
            .map(|data| data.token.clone())
    }

    /// Check if token is expired (or missing)
    pub fn is_expired(&self) -> bool {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().is_none_or(TokenData::is_expired)
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

/// Read the `exp` claim (seconds since epoch) from a JWT without verifying it.
pub fn expiry_from_claims(token: &str) -> Option<DateTime<Utc>> {
    let payload_b64 = token.trim().split('.').nth(1)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| URL_SAFE.decode(payload_b64))
        .ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    let exp = payload.get("exp")?.as_i64()?;
    Utc.timestamp_opt(exp, 0).single()
}
