//! `MemoryUserGateway` — a process-local [`UserGateway`].
//!
//! Mirrors the behaviour of the Postgres table (generated ids starting at 1,
//! insertion order, unique `email`) so handlers can be exercised without a
//! database.  Also backs `serve --storage memory`.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    models::{NewUser, UserPatch, UserRow},
    DbError, UserGateway,
};

const EMAIL_CONSTRAINT: &str = "users_email_unique";

#[derive(Debug)]
struct Table {
    next_id: i32,
    rows: Vec<UserRow>,
}

#[derive(Debug)]
pub struct MemoryUserGateway {
    table: Mutex<Table>,
}

impl Default for MemoryUserGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserGateway {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }
}

impl Table {
    fn email_taken(&self, email: &str, except_id: Option<i32>) -> bool {
        self.rows
            .iter()
            .any(|row| row.email == email && Some(row.id) != except_id)
    }
}

#[async_trait]
impl UserGateway for MemoryUserGateway {
    async fn list_all(&self) -> Result<Vec<UserRow>, DbError> {
        Ok(self.table.lock().await.rows.clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<UserRow>, DbError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, new_user: &NewUser) -> Result<UserRow, DbError> {
        let mut table = self.table.lock().await;
        if table.email_taken(&new_user.email, None) {
            return Err(DbError::ConstraintViolation(EMAIL_CONSTRAINT.into()));
        }

        let row = UserRow {
            id: table.next_id,
            name: new_user.name.clone(),
            age: new_user.age,
            email: new_user.email.clone(),
        };
        table.next_id += 1;
        table.rows.push(row.clone());
        debug!(id = row.id, "inserted user");
        Ok(row)
    }

    async fn update_by_id(&self, id: i32, patch: &UserPatch) -> Result<Option<UserRow>, DbError> {
        let mut table = self.table.lock().await;
        if !table.rows.iter().any(|row| row.id == id) {
            return Ok(None);
        }
        if let Some(email) = &patch.email {
            if table.email_taken(email, Some(id)) {
                return Err(DbError::ConstraintViolation(EMAIL_CONSTRAINT.into()));
            }
        }

        let Some(row) = table.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        patch.apply_to(row);
        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: i32) -> Result<Option<UserRow>, DbError> {
        let mut table = self.table.lock().await;
        let Some(pos) = table.rows.iter().position(|row| row.id == id) else {
            return Ok(None);
        };
        Ok(Some(table.rows.remove(pos)))
    }
}
