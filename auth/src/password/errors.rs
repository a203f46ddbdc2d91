use thiserror::Error;

/// Error type for password operations.
///
/// Verification never surfaces an error: a mismatch, a malformed hash and an
/// internal failure all read as `false` to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("{0}")]
    WeakSecret(String),
}
