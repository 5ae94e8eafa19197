//! The `UserGateway` trait — the contract between HTTP handlers and storage.

use async_trait::async_trait;
use tracing::debug;

use crate::{
    models::{NewUser, UserPatch, UserRow},
    repository::users as user_repo,
    DbError, DbPool,
};

/// Persistence operations on the `users` table.
///
/// Absence is a normal outcome: single-row operations return `Ok(None)` when
/// no row matches.  `Err` is reserved for real failures.
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Every row; empty when the table is empty.
    async fn list_all(&self) -> Result<Vec<UserRow>, DbError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<UserRow>, DbError>;

    /// Fails with [`DbError::ConstraintViolation`] on a duplicate `email`.
    async fn insert(&self, new_user: &NewUser) -> Result<UserRow, DbError>;

    async fn update_by_id(&self, id: i32, patch: &UserPatch) -> Result<Option<UserRow>, DbError>;

    /// Returns the removed row.
    async fn delete_by_id(&self, id: i32) -> Result<Option<UserRow>, DbError>;
}

/// Postgres-backed gateway.
#[derive(Debug, Clone)]
pub struct PgUserGateway {
    pool: DbPool,
}

impl PgUserGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserGateway for PgUserGateway {
    async fn list_all(&self) -> Result<Vec<UserRow>, DbError> {
        debug!("listing users");
        user_repo::list_users(&self.pool).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<UserRow>, DbError> {
        debug!(id, "fetching user");
        user_repo::get_user(&self.pool, id).await
    }

    async fn insert(&self, new_user: &NewUser) -> Result<UserRow, DbError> {
        debug!(email = %new_user.email, "inserting user");
        user_repo::insert_user(&self.pool, new_user).await
    }

    async fn update_by_id(&self, id: i32, patch: &UserPatch) -> Result<Option<UserRow>, DbError> {
        debug!(id, "updating user");
        user_repo::update_user(&self.pool, id, patch).await
    }

    async fn delete_by_id(&self, id: i32) -> Result<Option<UserRow>, DbError> {
        debug!(id, "deleting user");
        user_repo::delete_user(&self.pool, id).await
    }
}
