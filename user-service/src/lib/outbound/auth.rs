use std::sync::Arc;

use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::errors::TokenError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::ports::CredentialAuthenticator;

/// Argon2 + JWT implementation of the credential port.
///
/// Thin adapter over the shared `Authenticator`, which carries the signing
/// secret, audience, and TTL loaded once at startup.
pub struct JwtCredentialAuthenticator {
    authenticator: Arc<Authenticator>,
}

impl JwtCredentialAuthenticator {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl CredentialAuthenticator for JwtCredentialAuthenticator {
    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        Ok(self.authenticator.hash_password(password)?)
    }

    fn authenticate(&self, password: &str, user: &User) -> Result<String, UserError> {
        self.authenticator
            .authenticate(
                password,
                &user.password_hash,
                user.id.0,
                user.username.as_str(),
                user.email.as_str(),
            )
            .map(|result| result.access_token)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::Password(e) => UserError::Password(e),
                AuthenticationError::Jwt(e) => {
                    UserError::Token(TokenError::Signing(e.to_string()))
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn adapter() -> JwtCredentialAuthenticator {
        JwtCredentialAuthenticator::new(Arc::new(Authenticator::new(SECRET, "bookstore", 24)))
    }

    fn user_with_hash(password_hash: &str) -> User {
        User {
            id: UserId(42),
            name: "John Doe".to_string(),
            username: Username::new("jdoe".to_string()).unwrap(),
            email: EmailAddress::new("j@x.com".to_string()).unwrap(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
            modified_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_authenticate_issues_token_for_correct_password() {
        let adapter = adapter();

        let hash = adapter.hash_password("secret1").unwrap();
        let user = user_with_hash(&hash);

        let token = adapter.authenticate("secret1", &user).unwrap();

        let claims = Authenticator::new(SECRET, "bookstore", 24)
            .validate_token(&token)
            .unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "jdoe");
    }

    #[test]
    fn test_authenticate_rejects_wrong_password() {
        let adapter = adapter();

        let hash = adapter.hash_password("correct_password").unwrap();
        let user = user_with_hash(&hash);

        let result = adapter.authenticate("wrong_password", &user);
        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }
}
