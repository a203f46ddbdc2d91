use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Authenticated identity carried inside a token.
///
/// A snapshot taken at issuance; later changes to the stored user are not
/// visible until a new token is issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
    pub username: String,
}

impl Identity {
    pub fn new(user_id: i64, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            username: username.into(),
        }
    }
}

/// JWT payload: identity snapshot plus timing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity, valid from `issued_at` for `ttl`.
    ///
    /// # Arguments
    /// * `identity` - Identity snapshot to embed
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with identity fields, iat and exp set
    ///
    /// # Errors
    /// * `SigningFailed` - `issued_at + ttl` is outside the representable range
    pub fn for_identity(
        identity: &Identity,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::SigningFailed(format!("token lifetime of {} is out of range", ttl))
        })?;

        Ok(Self {
            user_id: identity.user_id,
            email: identity.email.clone(),
            username: identity.username.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Extract the embedded identity snapshot.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }

    /// Check if token is expired. A token is expired from its `exp` second on.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
