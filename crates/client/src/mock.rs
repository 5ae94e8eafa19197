//! `MockUsersApi` — a test double for [`UsersApi`].
//!
//! Holds rows in memory like the real server would and records every call
//! so tests can assert on the traffic the controller produced.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use db::{NewUser, UserPatch, UserRow};

use crate::{error::Result, ClientError, UsersApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(NewUser),
    Update(i32, UserPatch),
    Delete(i32),
}

#[derive(Default)]
pub struct MockUsersApi {
    pub rows: Arc<Mutex<Vec<UserRow>>>,
    pub calls: Arc<Mutex<Vec<Call>>>,
    /// When set, every call fails with a 500.
    pub failing: bool,
}

impl MockUsersApi {
    pub fn with_rows(rows: Vec<UserRow>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing {
            return Err(ClientError::Api {
                status: 500,
                message: "Internal server error".into(),
            });
        }
        Ok(())
    }

    fn not_found() -> ClientError {
        ClientError::Api {
            status: 404,
            message: "User not found".into(),
        }
    }
}

#[async_trait]
impl UsersApi for MockUsersApi {
    async fn list(&self) -> Result<Vec<UserRow>> {
        self.record(Call::List)?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, user: &NewUser) -> Result<UserRow> {
        self.record(Call::Create(user.clone()))?;
        let mut rows = self.rows.lock().unwrap();
        let row = UserRow {
            id: rows.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            name: user.name.clone(),
            age: user.age,
            email: user.email.clone(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, patch: &UserPatch) -> Result<UserRow> {
        self.record(Call::Update(id, patch.clone()))?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|r| r.id == id).ok_or_else(Self::not_found)?;
        patch.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<UserRow> {
        self.record(Call::Delete(id))?;
        let mut rows = self.rows.lock().unwrap();
        let pos = rows.iter().position(|r| r.id == id).ok_or_else(Self::not_found)?;
        Ok(rows.remove(pos))
    }
}
