//! User record store.
//!
//! The authentication core only depends on the `UserRepository` trait;
//! `UserStore` backs it with SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges};
use crate::errors::{StoreError, StoreResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Insert a new user (password already hashed)
    async fn create(&self, new_user: NewUser) -> StoreResult<User>;

    /// Apply a profile patch; `NotFound` if the user is gone
    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<User>;

    /// Swap the password hash only if it still equals `expected_hash`.
    ///
    /// Returns `false` when the record is missing or the hash changed in
    /// between.
    async fn replace_password(
        &self,
        id: Uuid,
        expected_hash: &str,
        new_hash: String,
    ) -> StoreResult<bool>;

    /// Permanently delete a user
    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Check store connectivity
    async fn ping(&self) -> StoreResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            birthday: Set(new_user.birthday),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut active: ActiveModel = user.into();

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(birthday) = changes.birthday {
            active.birthday = Set(Some(birthday));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn replace_password(
        &self,
        id: Uuid,
        expected_hash: &str,
        new_hash: String,
    ) -> StoreResult<bool> {
        // Single conditional UPDATE; the WHERE clause is the compare step.
        let result = UserEntity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(new_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::PasswordHash.eq(expected_hash))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}
