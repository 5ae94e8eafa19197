//! Postgres connection pool.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// DDL for the one table this application owns.
const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id    integer PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
    name  varchar(255) NOT NULL,
    age   integer NOT NULL,
    email varchar(255) NOT NULL UNIQUE
)
"#;

/// How long a handler waits for a free connection before the request fails.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool settings for the API.  A zero ceiling is raised to one connection.
pub fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

/// Open the users database at `database_url`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    let options = pool_options(max_connections);
    info!(
        max_connections = options.get_max_connections(),
        "opening users database pool"
    );
    Ok(options.connect(database_url).await?)
}

/// Create the `users` table if it does not exist yet.  Safe to run repeatedly.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), DbError> {
    info!("Ensuring users table exists");
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    Ok(())
}
