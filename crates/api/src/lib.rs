//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /api/users
//!   POST   /api/users
//!   GET    /api/users/{id}
//!   PUT    /api/users/{id}
//!   DELETE /api/users/{id}

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use error::ApiError;
pub use handlers::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let users = Router::new()
        .route("/users", get(handlers::users::list).post(handlers::users::create))
        .route(
            "/users/:id",
            get(handlers::users::get)
                .put(handlers::users::update)
                .delete(handlers::users::delete),
        );

    Router::new()
        .nest("/api", users)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `bind` and serve the API until the process is stopped.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    serve_on(listener, state).await
}

/// Serve the API on an already bound listener.
pub async fn serve_on(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    info!("API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
