//! User service - account lifecycle.
//!
//! Passwords are hashed here and nowhere else: once at creation, and again
//! only through `change_password`, which checks the current password and
//! writes with a compare-and-swap.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateUser, NewUser, Password, UpdateUser, User, UserChanges};
use crate::errors::{AppError, AppResult, AuthenticationError};
use crate::infra::UserRepository;

use super::hashing::HashingPool;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by username
    async fn get_user_by_username(&self, username: &str) -> AppResult<User>;

    /// Patch profile fields (never the password)
    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User>;

    /// Replace the password after checking the current one
    async fn change_password(&self, id: Uuid, current: String, new: String) -> AppResult<()>;

    /// Permanently delete the account
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Check the user store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    hasher: HashingPool,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: HashingPool) -> Self {
        Self { repo, hasher }
    }

    async fn ensure_username_free(&self, username: &str, owner: Option<Uuid>) -> AppResult<()> {
        match self.repo.find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::conflict("Username")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        self.ensure_username_free(&input.username, None).await?;

        let password = self.hasher.hash(input.password).await?;
        let user = self
            .repo
            .create(NewUser {
                username: input.username,
                email: input.email,
                password_hash: password.into_string(),
                birthday: input.birthday,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        if let Some(username) = &input.username {
            self.ensure_username_free(username, Some(id)).await?;
        }

        let changes = UserChanges {
            username: input.username,
            email: input.email,
            birthday: input.birthday,
        };

        if changes.is_empty() {
            return self.get_user(id).await;
        }

        let user = self.repo.update(id, changes).await?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn change_password(&self, id: Uuid, current: String, new: String) -> AppResult<()> {
        let user = self.get_user(id).await?;

        let stored = Password::from_hash(user.password_hash.as_str());
        if !self.hasher.verify(stored, current).await {
            return Err(AuthenticationError::InvalidCredentials.into());
        }

        let replacement = self.hasher.hash(new).await?;

        // Only swap if nobody changed the hash since we read it.
        let swapped = self
            .repo
            .replace_password(id, &user.password_hash, replacement.into_string())
            .await?;

        if !swapped {
            tracing::warn!(user_id = %id, "Password changed concurrently");
            return Err(AppError::ConcurrentModification("Password".to_string()));
        }

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(self.repo.ping().await?)
    }
}
