use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user: hash the password, persist, return the record.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password; the two
    ///   cases are indistinguishable to callers
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &Username, password: &str) -> Result<String, UserError>;

    /// Retrieve a user's profile by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or was soft-deleted
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Uniqueness of username and email is enforced at the storage layer.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and return it with the generated identifier.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve a user by username, ignoring soft-deleted records.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve a user by identifier, ignoring soft-deleted records.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}

/// Port for credential operations backing registration and login.
///
/// Pure and stateless; never touches storage.
pub trait CredentialAuthenticator: Send + Sync + 'static {
    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `Password` - Hashing operation failed
    fn hash_password(&self, password: &str) -> Result<String, UserError>;

    /// Verify a password against the user's stored hash and issue a signed
    /// access token carrying the user's identity claims.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is malformed
    /// * `Token` - Token could not be signed
    fn authenticate(&self, password: &str, user: &User) -> Result<String, UserError>;
}
