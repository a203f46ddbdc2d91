use chrono::Duration;

use crate::gate;
use crate::gate::GateError;
use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::SigningSecret;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing, token handling and request admission.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Validated secret key for JWT signing
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(secret),
        }
    }

    /// Override the lifetime of issued tokens.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_service = self.token_service.with_ttl(ttl);
        self
    }

    /// Token service used for issuance and validation.
    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Identity to embed in the token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the hash is unreadable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(identity)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Fail a login for an account that does not exist.
    ///
    /// Spends one password hash so the response takes about as long as a
    /// wrong password against a real account.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        if let Err(e) = self.password_hasher.hash(password) {
            tracing::warn!(error = %e, "Dummy password hash failed");
        }
        AuthenticationError::InvalidCredentials
    }

    /// Generate JWT token without password verification.
    ///
    /// Used right after registration, when the password was just set.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, identity: &Identity) -> Result<String, JwtError> {
        self.token_service.issue(identity)
    }

    /// Validate a JWT token and return the embedded identity.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Identity, JwtError> {
        self.token_service.validate(token)
    }

    /// Admission check on a raw `Authorization` header value.
    ///
    /// # Errors
    /// * `GateError` - Header missing, malformed, or token invalid
    pub fn admit(&self, authorization: Option<&str>) -> Result<Identity, GateError> {
        gate::admit(&self.token_service, authorization)
    }
}
