use crate::domain::validation::parse_int_prefix;
use crate::storage::StoreError;
use crate::transport::http::types::MessageResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const DB_ERROR_MESSAGE: &str = "DB error";

/// Logs the raw store error and answers with a generic `500 {message, error}`.
///
/// Constraint violations are deliberately not told apart from other failures.
pub fn store_failure(operation: &str, err: StoreError) -> Response {
    tracing::error!(operation, error = %err, "store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse {
            message: DB_ERROR_MESSAGE.to_string(),
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

/// Reads the `:srno` path segment with `parseInt` semantics (`"12abc"` is 12).
///
/// `None` means no row can match: no leading digits, or out of `i32` range.
pub fn srno_from_path(raw: &str) -> Option<i32> {
    parse_int_prefix(raw).and_then(|n| i32::try_from(n).ok())
}
