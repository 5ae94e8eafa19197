//! `client` crate — the users UI, minus the pixels.
//!
//! [`CrudController`] drives a [`UiState`] through the REST API exposed by the
//! `api` crate.  Every mutation is followed by a full re-fetch of the list; the
//! rows returned by the server are never merged locally.

pub mod api;
pub mod controller;
pub mod error;
pub mod form;
pub mod state;
pub mod view;

#[cfg(test)]
mod mock;

pub use api::{HttpUsersApi, UsersApi};
pub use controller::CrudController;
pub use error::ClientError;
pub use form::{FormError, FormField, UserForm};
pub use state::{FormMode, Notice, UiState};
