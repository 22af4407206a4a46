//! Account lookup for huddle.
//!
//! Accounts are owned by an external sign-up flow; the server only needs to
//! answer whether an address is known.

use super::DbPool;
use crate::Result;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Account address (email).
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Repository for account operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert an account.
    pub async fn create(&self, email: &str, name: &str) -> Result<User> {
        sqlx::query("INSERT INTO users (email, name) VALUES (?, ?)")
            .bind(email)
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(User {
            email: email.to_string(),
            name: name.to_string(),
        })
    }

    /// Look up an account by address.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT email, name FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Check whether an account exists for the address.
    pub async fn exists(&self, email: &str) -> Result<bool> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
