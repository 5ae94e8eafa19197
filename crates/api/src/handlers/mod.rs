//! Route handlers and the state they share.

use std::sync::Arc;

use db::UserGateway;

pub mod users;

/// Shared handler state.  Cheap to clone: the gateway sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn UserGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn UserGateway>) -> Self {
        Self { gateway }
    }
}
