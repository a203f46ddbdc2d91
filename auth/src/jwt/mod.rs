pub mod claims;
pub mod errors;
pub mod secret;
pub mod service;

pub use claims::Claims;
pub use claims::Identity;
pub use errors::JwtError;
pub use errors::SecretError;
pub use secret::SigningSecret;
pub use service::TokenService;
pub use service::DEFAULT_TOKEN_TTL_HOURS;
