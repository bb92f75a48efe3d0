use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::CredentialAuthenticator;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Orchestrates the credential flow: registration hashes and persists,
/// login fetches the record and hands verify-then-issue to the
/// authenticator. Collaborators are injected at construction for
/// substitutability.
pub struct UserService<UR, CA>
where
    UR: UserRepository,
    CA: CredentialAuthenticator,
{
    repository: Arc<UR>,
    authenticator: Arc<CA>,
}

impl<UR, CA> UserService<UR, CA>
where
    UR: UserRepository,
    CA: CredentialAuthenticator,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Credential hashing and token issuance implementation
    pub fn new(repository: Arc<UR>, authenticator: Arc<CA>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, CA> UserServicePort for UserService<UR, CA>
where
    UR: UserRepository,
    CA: CredentialAuthenticator,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // The plaintext never leaves this method
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = NewUser {
            name: command.name,
            username: command.username,
            email: command.email,
            password_hash,
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, username: &Username, password: &str) -> Result<String, UserError> {
        // Unknown username and wrong password must be indistinguishable
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let token = self.authenticator.authenticate(password, &user)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }

    async fn get_profile(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
