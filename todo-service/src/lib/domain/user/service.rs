use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::models::timestamp_now;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Session;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and session token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<Session, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.authenticator.hash_password(command.password.as_str())?;

        let now = timestamp_now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            name: command.name,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let user = self.repository.create(user).await?;
        let token = self.authenticator.issue_token(user.id.as_str())?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(Session { user, token })
    }

    async fn sign_in(&self, email: &EmailAddress, password: &str) -> Result<Session, UserError> {
        let Some(user) = self.repository.find_by_email(email.as_str()).await? else {
            return Err(self.authenticator.reject_unknown_account(password).into());
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id.as_str())?;

        Ok(Session {
            user,
            token: result.access_token,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
