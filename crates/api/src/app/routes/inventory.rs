//! Inventory routes: the five bulk operations plus read-only views.
//!
//! Bulk handlers hand the raw body to the service, which validates and
//! authorizes; the handler only maps the result to a status code.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use wareflow_core::ItemId;
use wareflow_infra::{InventoryStore, ItemFilter};
use wareflow_inventory::{ArchiveRequest, DeleteRequest, MoveRequest, RecategorizeRequest, RestoreRequest};

use crate::app::{dto, errors, AppServices};
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/archive", post(archive_items))
        .route("/items/restore", post(restore_items))
        .route("/items/delete", post(delete_items))
        .route("/items/move", post(move_items))
        .route("/items/recategorize", post(recategorize_items))
        .route("/items/:id", get(get_item))
        .route("/items/:id/transactions", get(item_transactions))
        .route("/locations", get(list_locations))
}

pub async fn archive_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<ArchiveRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejected_body(rejection),
    };
    let result = services
        .inventory
        .archive(&principal.principal(&tenant), &body)
        .await;
    errors::action_result_response(result)
}

pub async fn restore_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<RestoreRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejected_body(rejection),
    };
    let result = services
        .inventory
        .restore(&principal.principal(&tenant), &body)
        .await;
    errors::action_result_response(result)
}

pub async fn delete_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejected_body(rejection),
    };
    let result = services
        .inventory
        .permanent_delete(&principal.principal(&tenant), &body)
        .await;
    errors::action_result_response(result)
}

pub async fn move_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejected_body(rejection),
    };
    let result = services
        .inventory
        .bulk_move(&principal.principal(&tenant), &body)
        .await;
    errors::action_result_response(result)
}

pub async fn recategorize_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<RecategorizeRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejected_body(rejection),
    };
    let result = services
        .inventory
        .bulk_recategorize(&principal.principal(&tenant), &body)
        .await;
    errors::action_result_response(result)
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Query(query): Query<dto::ListItemsQuery>,
) -> axum::response::Response {
    let filter = ItemFilter {
        archived: query.archived,
    };
    match services.store().list_items(tenant.tenant_id(), filter).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    let store = services.store();
    let item = match store.get_item(tenant.tenant_id(), id).await {
        Ok(Some(item)) => item,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => return errors::store_error_to_response(e),
    };
    match store.stock_for_item(tenant.tenant_id(), id).await {
        Ok(stock) => (StatusCode::OK, Json(dto::ItemDetail { item, stock })).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn item_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    match services.store().transactions_for_item(tenant.tenant_id(), id).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_locations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> axum::response::Response {
    match services.store().list_locations(tenant.tenant_id()).await {
        Ok(locations) => (StatusCode::OK, Json(locations)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
