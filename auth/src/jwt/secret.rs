use std::fmt;

use super::errors::SecretError;

/// Symmetric key used to sign and verify tokens.
///
/// Built once at startup and never mutated. Construction fails for an
/// empty or short secret so a weak key cannot reach the token service.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Minimum accepted secret length for HS256 (256 bits).
    pub const MIN_LENGTH: usize = 32;

    /// Validate and wrap a secret.
    ///
    /// # Arguments
    /// * `secret` - Raw secret bytes
    ///
    /// # Returns
    /// SigningSecret holding a copy of the bytes
    ///
    /// # Errors
    /// * `Missing` - Secret is empty
    /// * `TooShort` - Secret is shorter than 32 bytes
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SecretError> {
        let secret = secret.as_ref();

        if secret.is_empty() {
            return Err(SecretError::Missing);
        }

        if secret.len() < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self(secret.to_vec()))
    }

    /// Get the raw secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
    }
}
