//! Domain layer - Core business entities and logic
//!
//! User records, identities, the password value object and the movie
//! catalog. Nothing in here talks to the store or the network.

pub mod movie;
pub mod password;
pub mod user;

pub use movie::{Catalog, Movie};
pub use password::Password;
pub use user::{CreateUser, Credentials, Identity, NewUser, UpdateUser, User, UserChanges};
