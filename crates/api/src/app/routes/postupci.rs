use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, OriginalUri, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use tenderi_core::{DomainError, Postupci, Record, crud};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_postupci).get(list_postupci))
        .route("/count", get(count_postupci))
        .route(
            "/:id",
            get(get_postupci)
                .put(update_postupci)
                .patch(partial_update_postupci)
                .delete(delete_postupci),
        )
}

pub async fn create_postupci(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Postupci>,
) -> axum::response::Response {
    tracing::debug!(?body, "request to save postupci");
    if let Err(e) = crud::require_new(&body) {
        return errors::domain_error_to_response(e);
    }

    let created = match services.postupci.save(body).await {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };

    let headers = common::creation_alert("postupci", created.id.unwrap_or_default());
    (StatusCode::CREATED, headers, Json(created)).into_response()
}

pub async fn update_postupci(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<Postupci>,
) -> axum::response::Response {
    tracing::debug!(id, "request to update postupci");
    if let Err(e) = crud::require_matching_id(id, &body) {
        return errors::domain_error_to_response(e);
    }
    match services.postupci.exists_by_id(id).await {
        Ok(true) => {}
        Ok(false) => return errors::domain_error_to_response(DomainError::not_found("postupci")),
        Err(e) => return errors::store_error_to_response(e),
    }

    let updated = match services.postupci.save(body).await {
        Ok(u) => u,
        Err(e) => return errors::store_error_to_response(e),
    };

    let headers = common::update_alert("postupci", id);
    (StatusCode::OK, headers, Json(updated)).into_response()
}

/// Merge-patch update; see the offer handler for the content-type contract.
pub async fn partial_update_postupci(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    body: Bytes,
) -> axum::response::Response {
    tracing::debug!(id, "request to partially update postupci");
    let patch: Postupci = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "malformed",
                "postupci",
                format!("malformed merge payload: {e}"),
            );
        }
    };
    if let Err(e) = crud::require_matching_id(id, &patch) {
        return errors::domain_error_to_response(e);
    }
    match services.postupci.exists_by_id(id).await {
        Ok(true) => {}
        Ok(false) => return errors::domain_error_to_response(DomainError::not_found("postupci")),
        Err(e) => return errors::store_error_to_response(e),
    }

    let merged = match services.postupci.find_by_id(id).await {
        Ok(Some(mut existing)) => {
            existing.merge(patch);
            existing
        }
        Ok(None) => return errors::domain_error_to_response(DomainError::not_found("postupci")),
        Err(e) => return errors::store_error_to_response(e),
    };

    let saved = match services.postupci.save(merged).await {
        Ok(s) => s,
        Err(e) => return errors::store_error_to_response(e),
    };

    let headers = common::update_alert("postupci", id);
    (StatusCode::OK, headers, Json(saved)).into_response()
}

pub async fn list_postupci(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> axum::response::Response {
    tracing::debug!("request to get a page of postupci");
    let pageable = match dto::pageable_from_query("postupci", &params) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let page = match services.postupci.find_all(&pageable).await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let headers = common::pagination_headers(uri.path(), &page);
    (StatusCode::OK, headers, Json(page.items)).into_response()
}

pub async fn count_postupci(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.postupci.count().await {
        Ok(total) => (StatusCode::OK, Json(total)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_postupci(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    tracing::debug!(id, "request to get postupci");
    match services.postupci.find_by_id(id).await {
        Ok(Some(found)) => (StatusCode::OK, Json(found)).into_response(),
        Ok(None) => errors::domain_error_to_response(DomainError::not_found("postupci")),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_postupci(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    tracing::debug!(id, "request to delete postupci");
    if let Err(e) = services.postupci.delete_by_id(id).await {
        return errors::store_error_to_response(e);
    }
    let headers = common::deletion_alert("postupci", id);
    (StatusCode::NO_CONTENT, headers).into_response()
}
