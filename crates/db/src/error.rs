//! Typed error type for the db crate.

use thiserror::Error;

/// SQLSTATE raised by Postgres for a `UNIQUE` constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(sqlx::Error),

    /// A write was rejected by a table constraint (e.g. duplicate `email`).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return Self::ConstraintViolation(constraint);
            }
        }
        Self::Sqlx(err)
    }
}
