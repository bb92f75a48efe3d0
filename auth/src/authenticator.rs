use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT
/// issuance.
///
/// Holds the process-wide token configuration (secret, audience, TTL),
/// loaded once at startup and treated as read-only thereafter.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    audience: String,
    token_ttl_hours: i64,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
///
/// `InvalidCredentials` deliberately carries the same message whether the
/// username or the password was wrong.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("invalid password or username")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Jwt(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - HMAC signing secret
    /// * `audience` - Audience claim stamped into issued tokens
    /// * `token_ttl_hours` - Token lifetime in hours
    pub fn new(jwt_secret: &[u8], audience: impl Into<String>, token_ttl_hours: i64) -> Self {
        let audience = audience.into();
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, audience.clone()),
            audience,
            token_ttl_hours,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Password verification failed
    /// * `Jwt` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(user_id, username, email)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// The claim set carries the user identity, `sub` = username,
    /// `aud` = configured audience, and `iat`/`nbf`/`exp` time bounds.
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    pub fn issue_token(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, username, email, &self.audience, self.token_ttl_hours);
        self.jwt_handler.encode(&claims)
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET, "bookstore", 24);

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, 42, "alice", "alice@example.com")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET, "bookstore", 24);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, 42, "alice", "a@b.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        let message = AuthenticationError::InvalidCredentials.to_string();
        assert_eq!(message, "invalid password or username");
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(SECRET, "bookstore", 24);

        let token = authenticator
            .issue_token(7, "bob", "bob@example.com")
            .expect("Failed to issue token");

        let claims = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.aud, "bookstore");
    }

    #[test]
    fn test_validate_malformed_token() {
        let authenticator = Authenticator::new(SECRET, "bookstore", 24);

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
