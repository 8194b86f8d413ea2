//! User domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User record as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record from an already hashed password
    pub fn new(id: Uuid, username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            password_hash,
            birthday: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Strip the password hash off.
    pub fn identity(&self) -> Identity {
        Identity::from(self)
    }
}

/// Authenticated subject: the user record minus its password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Unique username
    #[schema(example = "alice")]
    pub username: String,
    /// User email address
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Optional birthday
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            birthday: user.birthday,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            birthday: user.birthday,
        }
    }
}

/// Login attempt. Lives only for the duration of one request.
#[derive(Clone, Deserialize, ToSchema)]
pub struct Credentials {
    #[serde(alias = "Username")]
    #[schema(example = "alice")]
    pub username: String,
    #[serde(alias = "Password")]
    #[schema(example = "Secret123")]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Never print the plain text password
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Account creation input (plain text password, hashed by the service)
#[derive(Clone)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// Profile update input. Passwords change only through `change_password`.
#[derive(Clone, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Record handed to the store on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub birthday: Option<NaiveDate>,
}

/// Profile field patch handed to the store on update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl UserChanges {
    /// True when the patch would not touch any field.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.birthday.is_none()
    }
}
