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

use super::claims::Claims;
use super::errors::ConfigError;
use super::errors::TokenError;

/// Signs, serializes, parses, and verifies compact signed tokens.
///
/// Tokens are standard three-segment JWTs (`header.payload.signature`, each
/// segment base64url without padding) signed with HMAC-SHA256 over the first
/// two segments. The codec holds the process-wide symmetric secret, loaded
/// once at startup and never rotated at runtime.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Minimum signing secret length for HS256.
    pub const MIN_SECRET_BYTES: usize = 32;

    /// Create a new token codec with a symmetric signing secret.
    ///
    /// # Arguments
    /// * `secret` - Signing secret; must be at least 32 bytes (256 bits)
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret is absent or shorter than 32 bytes.
    ///   Callers treat this as fatal at startup, not a per-call error.
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.len() < Self::MIN_SECRET_BYTES {
            return Err(ConfigError::SecretTooShort {
                min: Self::MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue a signed token from a claim set.
    ///
    /// Stamps `iat = now` and `exp = now + ttl` before signing; any values
    /// already present in the claim set are overwritten.
    ///
    /// # Arguments
    /// * `claims` - Claim set to embed
    /// * `ttl` - Time until the token expires
    ///
    /// # Returns
    /// Compact serialized token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Claim serialization or signing failed
    pub fn issue(&self, claims: &Claims, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();

        let mut claims = claims.clone();
        claims.iat = Some(now.timestamp());
        claims.exp = Some((now + ttl).timestamp());

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Parse and verify a token, returning its claim set.
    ///
    /// The signature is verified before any claim is deserialized, so no
    /// claim value from a forged token is ever observed. Expiry is checked
    /// with zero leeway.
    ///
    /// # Arguments
    /// * `token` - Compact serialized token string
    ///
    /// # Errors
    /// * `Malformed` - Structure could not be decoded
    /// * `BadSignature` - MAC does not verify against the current secret
    /// * `Expired` - `now > exp`
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
