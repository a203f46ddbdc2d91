use serde::Deserialize;

use super::errors::PasswordError;

/// Strength requirements applied to a new password before it is hashed.
///
/// Only the minimum length is enforced by default. The character-class
/// switches are off unless enabled through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum number of characters (not bytes).
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
}

impl PasswordPolicy {
    pub const DEFAULT_MIN_LENGTH: usize = 8;

    /// Create the default policy (minimum length only).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn require_uppercase(mut self) -> Self {
        self.require_uppercase = true;
        self
    }

    pub fn require_lowercase(mut self) -> Self {
        self.require_lowercase = true;
        self
    }

    pub fn require_digit(mut self) -> Self {
        self.require_digit = true;
        self
    }

    pub fn require_symbol(mut self) -> Self {
        self.require_symbol = true;
        self
    }

    /// Check a plaintext password against every enabled requirement.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to check
    ///
    /// # Errors
    /// * `WeakSecret` - First requirement the password fails, as a user-facing message
    pub fn check(&self, password: &str) -> Result<(), PasswordError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordError::WeakSecret(format!(
                "password must be at least {} characters long",
                self.min_length
            )));
        }

        let checks: [(bool, fn(char) -> bool, &str); 4] = [
            (
                self.require_uppercase,
                char::is_uppercase,
                "password must contain an uppercase letter",
            ),
            (
                self.require_lowercase,
                char::is_lowercase,
                "password must contain a lowercase letter",
            ),
            (
                self.require_digit,
                |c| c.is_ascii_digit(),
                "password must contain a digit",
            ),
            (
                self.require_symbol,
                |c| !c.is_alphanumeric() && !c.is_whitespace(),
                "password must contain a special character",
            ),
        ];

        for (enabled, matches, message) in checks {
            if enabled && !password.chars().any(matches) {
                return Err(PasswordError::WeakSecret(message.to_string()));
            }
        }

        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: Self::DEFAULT_MIN_LENGTH,
            require_uppercase: false,
            require_lowercase: false,
            require_digit: false,
            require_symbol: false,
        }
    }
}
