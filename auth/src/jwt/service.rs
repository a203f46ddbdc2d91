use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::claims::Identity;
use super::errors::JwtError;
use super::secret::SigningSecret;

/// Algorithms accepted on validation: the HMAC family only.
pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Default token lifetime in hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Token issuance and validation.
///
/// Holds keys derived from a single signing secret and the token lifetime.
/// Immutable after construction, so one instance is shared across requests
/// without locking. Issues HS256 tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

#[derive(Deserialize)]
struct TokenHeader {
    alg: String,
}

impl TokenService {
    /// Create a new token service with a validated secret.
    ///
    /// # Arguments
    /// * `secret` - Signing secret (at least 32 bytes, enforced by `SigningSecret`)
    ///
    /// # Returns
    /// TokenService issuing HS256 tokens valid for 24 hours
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Lifetime applied to newly issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for an identity.
    ///
    /// # Arguments
    /// * `identity` - Identity snapshot to embed
    ///
    /// # Returns
    /// Compact JWT string, expiring `ttl` from now
    ///
    /// # Errors
    /// * `SigningFailed` - Lifetime overflows, or serialization or signing failed
    pub fn issue(&self, identity: &Identity) -> Result<String, JwtError> {
        let claims = Claims::for_identity(identity, Utc::now(), self.ttl)?;
        self.encode(&claims)
    }

    /// Sign explicit claims.
    ///
    /// # Errors
    /// * `SigningFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Validate a token and return the identity it carries.
    ///
    /// # Errors
    /// See [`TokenService::decode`].
    pub fn validate(&self, token: &str) -> Result<Identity, JwtError> {
        self.decode(token).map(|claims| claims.identity())
    }

    /// Validate a token and return its full claims.
    ///
    /// Checks run in order: shape, declared algorithm, signature, expiry.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `MalformedToken` - Empty, wrong segment count, or undecodable header/payload
    /// * `UnsupportedAlgorithm` - Header declares anything outside HS256/HS384/HS512
    /// * `InvalidSignature` - Signature does not match the held secret
    /// * `Expired` - Current time is at or past `exp`
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        if token.is_empty() {
            return Err(JwtError::MalformedToken("token is empty".to_string()));
        }

        let algorithm = declared_algorithm(token)?;

        let mut validation = Validation::new(algorithm);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // Expiry is checked below so that `exp == now` is already rejected.
        validation.validate_exp = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::InvalidAlgorithm => {
                        JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm))
                    }
                    _ => JwtError::MalformedToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}

/// Read the `alg` header field without trusting anything else in the token.
fn declared_algorithm(token: &str) -> Result<Algorithm, JwtError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| JwtError::MalformedToken(format!("header is not base64url: {}", e)))?;
    let header: TokenHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| JwtError::MalformedToken(format!("header is not valid JSON: {}", e)))?;

    match header.alg.as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(JwtError::UnsupportedAlgorithm(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";
    const OTHER_SECRET: &[u8] = b"another_secret_key_32_bytes_long!!!!";

    fn service(secret: &[u8]) -> TokenService {
        TokenService::new(&SigningSecret::new(secret).expect("valid secret"))
    }

    fn identity() -> Identity {
        Identity::new(7, "nicola@example.com", "nicola")
    }

    fn with_header(token: &str, header_json: &str) -> String {
        let rest = token.split_once('.').map(|(_, rest)| rest).unwrap();
        format!("{}.{}", URL_SAFE_NO_PAD.encode(header_json), rest)
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service(SECRET);

        let token = service.issue(&identity()).expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let validated = service.validate(&token).expect("Failed to validate token");
        assert_eq!(validated, identity());
    }

    #[test]
    fn test_issued_token_lifetime() {
        let service = service(SECRET);

        let token = service.issue(&identity()).unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_HOURS * 60 * 60);
        assert!((claims.iat - Utc::now().timestamp()).abs() <= 5);
    }

    #[test]
    fn test_custom_ttl() {
        let service = service(SECRET).with_ttl(Duration::minutes(15));

        let token = service.issue(&identity()).unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_issue_with_overflowing_ttl_fails() {
        let service = service(SECRET).with_ttl(Duration::MAX);

        assert!(matches!(
            service.issue(&identity()),
            Err(JwtError::SigningFailed(_))
        ));
    }

    #[test]
    fn test_issued_header_is_hs256() {
        let token = service(SECRET).issue(&identity()).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();

        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_validate_empty_token() {
        assert!(matches!(
            service(SECRET).validate(""),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_validate_garbage_token() {
        let service = service(SECRET);

        assert!(matches!(
            service.validate("invalid.token.here"),
            Err(JwtError::MalformedToken(_))
        ));
        assert!(matches!(
            service.validate("not-a-jwt"),
            Err(JwtError::MalformedToken(_))
        ));
        assert!(matches!(
            service.validate("a.b.c.d"),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = service(OTHER_SECRET).issue(&identity()).unwrap();

        assert_eq!(
            service(SECRET).validate(&token),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_validate_tampered_payload() {
        let service = service(SECRET);
        let token = service.issue(&identity()).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        let mut claims = service.decode(&token).unwrap();
        claims.user_id = 1;
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let forged = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);

        assert_eq!(service.validate(&forged), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_validate_expired_token() {
        let service = service(SECRET);
        let now = Utc::now();
        let claims =
            Claims::for_identity(&identity(), now - Duration::hours(25), Duration::hours(24))
                .unwrap();

        let token = service.encode(&claims).unwrap();

        assert_eq!(service.validate(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_validate_token_expiring_now() {
        let service = service(SECRET);
        let now = Utc::now();
        let claims =
            Claims::for_identity(&identity(), now - Duration::hours(1), Duration::hours(1))
                .unwrap();

        let token = service.encode(&claims).unwrap();

        assert_eq!(service.validate(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_expired_token_with_wrong_secret_reports_signature() {
        let claims = Claims::for_identity(
            &identity(),
            Utc::now() - Duration::hours(48),
            Duration::hours(24),
        )
        .unwrap();
        let token = service(OTHER_SECRET).encode(&claims).unwrap();

        assert_eq!(
            service(SECRET).validate(&token),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_validate_rejects_non_hmac_algorithm() {
        let service = service(SECRET);
        let token = service.issue(&identity()).unwrap();

        let forged = with_header(&token, r#"{"alg":"RS256","typ":"JWT"}"#);

        assert_eq!(
            service.validate(&forged),
            Err(JwtError::UnsupportedAlgorithm("RS256".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_none_algorithm() {
        let service = service(SECRET);
        let token = service.issue(&identity()).unwrap();

        let forged = with_header(&token, r#"{"alg":"none","typ":"JWT"}"#);
        let unsigned = format!("{}.", &forged[..forged.rfind('.').unwrap()]);

        assert_eq!(
            service.validate(&unsigned),
            Err(JwtError::UnsupportedAlgorithm("none".to_string()))
        );
    }

    #[test]
    fn test_validate_accepts_other_hmac_variants() {
        let service = service(SECRET);
        let claims = Claims::for_identity(&identity(), Utc::now(), Duration::hours(1)).unwrap();

        for algorithm in [Algorithm::HS384, Algorithm::HS512] {
            let token = jsonwebtoken::encode(
                &Header::new(algorithm),
                &claims,
                &EncodingKey::from_secret(SECRET),
            )
            .unwrap();

            assert_eq!(service.validate(&token), Ok(identity()));
        }
    }

    #[test]
    fn test_validate_rejects_missing_claims() {
        let service = service(SECRET);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "sub": "7", "exp": Utc::now().timestamp() + 60 }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            service.validate(&token),
            Err(JwtError::MalformedToken(_))
        ));
    }
}
