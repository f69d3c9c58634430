//! Registration, login and password changes

use common::{error::DatabaseError, token::TokenService, user_name::normalize_user_name};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{AuthError, AuthResult},
    models::{NewUser, User, UserId},
    password::CredentialHasher,
    repositories::CredentialStore,
    validation::{normalize_email, validate_password},
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    hasher: CredentialHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn CredentialStore>, hasher: CredentialHasher, tokens: TokenService) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn register(&self, user_name: &str, email: &str, password: &str) -> AuthResult<User> {
        let user_name =
            normalize_user_name(user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = normalize_email(email).map_err(AuthError::Validation)?;
        validate_password(password).map_err(AuthError::WeakPassword)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        let password_hash = self.hasher.spawn_hash(password).await?;
        let new_user = NewUser {
            user_name,
            email,
            password_hash,
        };

        match self.users.create(&new_user).await {
            Ok(user) => {
                info!(user_id = user.user_id, "User registered");
                Ok(user)
            }
            // lost a race with a concurrent registration
            Err(DatabaseError::UniqueViolation(_)) => Err(AuthError::UserExists),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and issue an access token
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<String> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.spawn_verify(password, &user.password_hash).await? {
            warn!(user_id = user.user_id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.user_id)?;
        info!(user_id = user.user_id, "User logged in");
        Ok(token)
    }

    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> AuthResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !self
            .hasher
            .spawn_verify(current_password, &user.password_hash)
            .await?
        {
            warn!(user_id, "Password change with wrong current password");
            return Err(AuthError::InvalidCredentials);
        }

        validate_password(new_password).map_err(AuthError::WeakPassword)?;

        let password_hash = self.hasher.spawn_hash(new_password).await?;
        if !self.users.update_password(user_id, &password_hash).await? {
            return Err(AuthError::Unauthorized);
        }

        info!(user_id, "Password changed");
        Ok(())
    }
}
