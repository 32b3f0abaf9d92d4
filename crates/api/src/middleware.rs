//! Request-scoped HTTP middleware.

use axum::{extract::Request, middleware::Next, response::Response};

/// Emit one log line per handled request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;

    tracing::debug!(%method, path, status = %response.status(), "handled request");
    response
}
