//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, the `users` row structs, repository functions
//! and the [`UserGateway`] seam the API layer talks to.  No HTTP concerns live here.

pub mod error;
pub mod gateway;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repository;

pub use error::DbError;
pub use gateway::{PgUserGateway, UserGateway};
pub use memory::MemoryUserGateway;
pub use models::{NewUser, UserPatch, UserRow};
pub use pool::DbPool;
