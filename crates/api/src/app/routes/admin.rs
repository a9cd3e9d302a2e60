//! Admin routes: audit trail inspection.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use wareflow_infra::AuditSink;

use crate::app::{dto, errors, AppServices};
use crate::authz::{authorize_operation, AUDIT_READ};
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new().route("/audit-log", get(audit_log))
}

pub async fn audit_log(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Query(query): Query<dto::AuditLogQuery>,
) -> axum::response::Response {
    if let Err(e) = authorize_operation(&tenant, &principal, AUDIT_READ) {
        tracing::warn!(error = %e, "audit log access denied");
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", "insufficient rights");
    }

    match services.audit().recent(tenant.tenant_id(), query.limit()).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "audit log read failed");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "audit_error",
                wareflow_infra::service::PERSISTENCE_FAILURE_MESSAGE,
            )
        }
    }
}
