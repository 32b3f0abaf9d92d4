use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tenderi_core::DomainError;
use tenderi_store::StoreError;

/// Map a domain failure onto the transport contract.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match err {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
    };
    json_error(status, err.key(), err.entity(), err.to_string())
}

/// Store faults are unexpected; surface them without retry.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store operation failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "storefailure",
        "store",
        err.to_string(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    entity: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "entityName": entity,
            "message": message.into(),
        })),
    )
        .into_response()
}
