//! SQL for the `users` table, one `pub async fn` per statement.
//!
//! [`crate::PgUserGateway`] is the only caller; handlers go through the gateway.

pub mod users;
