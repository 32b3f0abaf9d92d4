use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, OriginalUri, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use tenderi_core::{DomainError, Ponude, Record, crud};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_ponude).get(list_ponude))
        .route("/count", get(count_ponude))
        .route(
            "/:id",
            get(get_ponude)
                .put(update_ponude)
                .patch(partial_update_ponude)
                .delete(delete_ponude),
        )
}

pub async fn create_ponude(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Ponude>,
) -> axum::response::Response {
    tracing::debug!(?body, "request to save ponude");
    if let Err(e) = crud::require_new(&body) {
        return errors::domain_error_to_response(e);
    }

    let created = match services.ponude.save(body).await {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };

    let headers = common::creation_alert("ponude", created.id.unwrap_or_default());
    (StatusCode::CREATED, headers, Json(created)).into_response()
}

pub async fn update_ponude(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<Ponude>,
) -> axum::response::Response {
    tracing::debug!(id, "request to update ponude");
    if let Err(e) = crud::require_matching_id(id, &body) {
        return errors::domain_error_to_response(e);
    }
    match services.ponude.exists_by_id(id).await {
        Ok(true) => {}
        Ok(false) => return errors::domain_error_to_response(DomainError::not_found("ponude")),
        Err(e) => return errors::store_error_to_response(e),
    }

    let updated = match services.ponude.save(body).await {
        Ok(u) => u,
        Err(e) => return errors::store_error_to_response(e),
    };

    let headers = common::update_alert("ponude", id);
    (StatusCode::OK, headers, Json(updated)).into_response()
}

/// Merge-patch update: fields absent from the payload keep their stored
/// value. Accepts both `application/json` and `application/merge-patch+json`.
pub async fn partial_update_ponude(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    body: Bytes,
) -> axum::response::Response {
    tracing::debug!(id, "request to partially update ponude");
    let patch: Ponude = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "malformed",
                "ponude",
                format!("malformed merge payload: {e}"),
            );
        }
    };
    if let Err(e) = crud::require_matching_id(id, &patch) {
        return errors::domain_error_to_response(e);
    }
    match services.ponude.exists_by_id(id).await {
        Ok(true) => {}
        Ok(false) => return errors::domain_error_to_response(DomainError::not_found("ponude")),
        Err(e) => return errors::store_error_to_response(e),
    }

    // The merge target is looked up again at merge time; a concurrent delete
    // between the checks surfaces as not-found rather than a resurrection.
    let merged = match services.ponude.find_by_id(id).await {
        Ok(Some(mut existing)) => {
            existing.merge(patch);
            existing
        }
        Ok(None) => return errors::domain_error_to_response(DomainError::not_found("ponude")),
        Err(e) => return errors::store_error_to_response(e),
    };

    let saved = match services.ponude.save(merged).await {
        Ok(s) => s,
        Err(e) => return errors::store_error_to_response(e),
    };

    let headers = common::update_alert("ponude", id);
    (StatusCode::OK, headers, Json(saved)).into_response()
}

pub async fn list_ponude(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> axum::response::Response {
    tracing::debug!("request to get a page of ponude");
    let criteria = match dto::ponude_criteria_from_query(&params) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let pageable = match dto::pageable_from_query("ponude", &params) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let page = match services.ponude.find_by_criteria(&criteria, &pageable).await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let headers = common::pagination_headers(uri.path(), &page);
    (StatusCode::OK, headers, Json(page.items)).into_response()
}

pub async fn count_ponude(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<Vec<(String, String)>>,
) -> axum::response::Response {
    let criteria = match dto::ponude_criteria_from_query(&params) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.ponude.count_by_criteria(&criteria).await {
        Ok(total) => (StatusCode::OK, Json(total)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_ponude(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    tracing::debug!(id, "request to get ponude");
    match services.ponude.find_by_id(id).await {
        Ok(Some(found)) => (StatusCode::OK, Json(found)).into_response(),
        Ok(None) => errors::domain_error_to_response(DomainError::not_found("ponude")),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_ponude(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    tracing::debug!(id, "request to delete ponude");
    if let Err(e) = services.ponude.delete_by_id(id).await {
        return errors::store_error_to_response(e);
    }
    let headers = common::deletion_alert("ponude", id);
    (StatusCode::NO_CONTENT, headers).into_response()
}
