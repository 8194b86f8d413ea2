//! Bounded worker pool for password hashing.
//!
//! Argon2 jobs run on tokio's blocking threads; a semaphore caps how many
//! run at once.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::domain::Password;
use crate::errors::{AppError, AppResult};

/// Shared handle to the hashing pool.
#[derive(Clone)]
pub struct HashingPool {
    permits: Arc<Semaphore>,
}

impl HashingPool {
    /// Create a pool running at most `workers` jobs concurrently.
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Hash a plain text password (length rules are applied by `Password`).
    pub async fn hash(&self, plain_text: String) -> AppResult<Password> {
        self.run(move || Password::new(&plain_text)).await?
    }

    /// Verify a plain text password against a stored hash.
    ///
    /// Fails closed: a pool failure counts as a mismatch.
    pub async fn verify(&self, stored: Password, plain_text: String) -> bool {
        match self.run(move || stored.verify(&plain_text)).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Password verification job failed: {}", e);
                false
            }
        }
    }

    async fn run<F, T>(&self, job: F) -> AppResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AppError::internal("Hashing pool closed"))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| AppError::internal(format!("Hashing job panicked: {}", e)))
    }
}
