use thiserror::Error;

use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::TokenService;

/// Exact, case-sensitive prefix of an `Authorization` header carrying a token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Admission failures. Every variant means "unauthenticated".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Authorization header missing")]
    MissingHeader,

    #[error("Invalid authorization header format")]
    InvalidFormat,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),
}

impl GateError {
    /// Message safe to return to the client.
    ///
    /// Token failures share one message so the response does not reveal
    /// which validation step failed.
    pub fn public_message(&self) -> &'static str {
        match self {
            GateError::MissingHeader => "Authorization header missing",
            GateError::InvalidFormat => "Invalid authorization header format",
            GateError::InvalidToken(_) => "Invalid or expired token",
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// # Arguments
/// * `header` - Header value, `None` if the header is absent
///
/// # Returns
/// Token string following `"Bearer "` (may be empty)
///
/// # Errors
/// * `MissingHeader` - Header absent or empty
/// * `InvalidFormat` - Value does not start with `"Bearer "`
pub fn extract_bearer(header: Option<&str>) -> Result<&str, GateError> {
    let header = match header {
        None | Some("") => return Err(GateError::MissingHeader),
        Some(header) => header,
    };

    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(GateError::InvalidFormat)
}

/// Run the admission check for one request.
///
/// # Arguments
/// * `tokens` - Token service holding the signing secret
/// * `header` - `Authorization` header value, `None` if absent
///
/// # Returns
/// Identity embedded in the validated token
///
/// # Errors
/// * `MissingHeader` / `InvalidFormat` - Header problems
/// * `InvalidToken` - Token failed validation (wraps the detailed `JwtError`)
pub fn admit(tokens: &TokenService, header: Option<&str>) -> Result<Identity, GateError> {
    let token = extract_bearer(header)?;
    Ok(tokens.validate(token)?)
}
