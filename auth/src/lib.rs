//! Authentication utilities library
//!
//! Provides the credential and session core used by the user service:
//! - Password hashing (Argon2id) and password policy
//! - JWT token issuance and validation (HMAC family only)
//! - Request admission from an `Authorization: Bearer` header
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Identity, SigningSecret, TokenService};
//!
//! let secret = SigningSecret::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let tokens = TokenService::new(&secret);
//! let identity = Identity::new(1, "alice@example.com", "alice");
//! let token = tokens.issue(&identity).unwrap();
//! assert_eq!(tokens.validate(&token).unwrap(), identity);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity, SigningSecret};
//!
//! let secret = SigningSecret::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let identity = Identity::new(1, "alice@example.com", "alice");
//! let result = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Gate a request
//! let header = format!("Bearer {}", result.access_token);
//! let admitted = auth.admit(Some(&header)).unwrap();
//! assert_eq!(admitted.user_id, 1);
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::GateError;
pub use jwt::Claims;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::SecretError;
pub use jwt::SigningSecret;
pub use jwt::TokenService;
pub use jwt::DEFAULT_TOKEN_TTL_HOURS;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
