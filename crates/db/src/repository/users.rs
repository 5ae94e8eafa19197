//! User CRUD operations.
//!
//! Each function issues exactly one statement.  Lookups that match no row
//! come back as `None`, never as an error.

use sqlx::PgPool;

use crate::{
    models::{NewUser, UserPatch, UserRow},
    DbError,
};

/// Return every user in insertion order.
pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, DbError> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"SELECT id, name, age, email FROM users ORDER BY id ASC"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch a single user by its primary key.
pub async fn get_user(pool: &PgPool, id: i32) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"SELECT id, name, age, email FROM users WHERE id = $1 LIMIT 1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert a new user and return the stored row, including its generated `id`.
///
/// A duplicate `email` surfaces as [`DbError::ConstraintViolation`].
pub async fn insert_user(pool: &PgPool, new_user: &NewUser) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (name, age, email)
        VALUES ($1, $2, $3)
        RETURNING id, name, age, email
        "#,
    )
    .bind(&new_user.name)
    .bind(new_user.age)
    .bind(&new_user.email)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Overwrite the supplied fields of a user and return the updated row.
///
/// An empty patch writes nothing and returns the row as currently stored.
pub async fn update_user(
    pool: &PgPool,
    id: i32,
    patch: &UserPatch,
) -> Result<Option<UserRow>, DbError> {
    if patch.is_empty() {
        return get_user(pool, id).await;
    }

    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET name  = COALESCE($1, name),
            age   = COALESCE($2, age),
            email = COALESCE($3, email)
        WHERE id = $4
        RETURNING id, name, age, email
        "#,
    )
    .bind(patch.name.as_deref())
    .bind(patch.age)
    .bind(patch.email.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Permanently delete a user and return the removed row's snapshot.
pub async fn delete_user(pool: &PgPool, id: i32) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"DELETE FROM users WHERE id = $1 RETURNING id, name, age, email"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
