use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

use wareflow_core::DomainError;
use wareflow_infra::{ActionResult, BulkError, BulkSummary, FailureKind, StoreError};

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Reads hide storage details the same way bulk operations do.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "inventory read failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        wareflow_infra::service::PERSISTENCE_FAILURE_MESSAGE,
    )
}

pub fn status_for(failure: Option<FailureKind>) -> StatusCode {
    match failure {
        None => StatusCode::OK,
        Some(FailureKind::Validation) => StatusCode::BAD_REQUEST,
        Some(FailureKind::Forbidden) => StatusCode::FORBIDDEN,
        Some(FailureKind::Persistence) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Uniform `{ success, error?, data? }` body with a status matching the failure.
pub fn action_result_response<T: Serialize>(result: ActionResult<T>) -> axum::response::Response {
    (status_for(result.failure), axum::Json(result)).into_response()
}

/// A body that is not valid JSON for the request type is a validation failure.
pub fn rejected_body(rejection: JsonRejection) -> axum::response::Response {
    let err = BulkError::Validation(DomainError::validation("body", rejection.body_text()));
    action_result_response(ActionResult::<BulkSummary>::failed(&err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_map_to_distinct_statuses() {
        assert_eq!(status_for(None), StatusCode::OK);
        assert_eq!(status_for(Some(FailureKind::Validation)), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(Some(FailureKind::Forbidden)), StatusCode::FORBIDDEN);
        assert_eq!(status_for(Some(FailureKind::Persistence)), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
