use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for signing and validating bookstore access tokens.
///
/// Uses HS256 (HMAC with SHA-256). Validation pins the algorithm, so a
/// token whose header advertises anything else is rejected outright
/// (algorithm-substitution defense), and enforces signature, `exp`, `nbf`,
/// and `aud`.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    audience: String,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret (at least 32 bytes for HS256;
    ///   keep it in configuration, never in code)
    /// * `audience` - Audience string stamped into and required of tokens
    pub fn new(secret: &[u8], audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            audience: audience.into(),
        }
    }

    /// Sign a claim set into a compact JWT string.
    ///
    /// # Errors
    /// * `SigningFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `TokenNotYetValid` - `nbf` is in the future
    /// * `InvalidSignature` - Signature mismatch or unexpected algorithm
    /// * `DecodingFailed` - Malformed token, wrong audience, or schema
    ///   violation
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_audience(&[self.audience.as_str()]);
        validation.validate_nbf = true;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::ImmatureSignature => JwtError::TokenNotYetValid,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::InvalidSignature
                    }
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
