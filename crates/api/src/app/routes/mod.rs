use axum::Router;

pub mod common;
pub mod ponude;
pub mod postupci;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/api/ponudes", ponude::router())
        .nest("/api/postupcis", postupci::router())
}
