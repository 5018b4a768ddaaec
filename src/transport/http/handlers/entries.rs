//! `/entries` handlers: one store statement per request, no business logic.

use crate::domain::entry::Entry;
use crate::transport::http::handlers::common::{srno_from_path, store_failure};
use crate::transport::http::types::{
    json_422, AppState, CreateEntryRequest, MessageResponse, UpdateEntryRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const ENTRY_ADDED: &str = "Entry added successfully";
pub const ENTRY_UPDATED: &str = "Entry updated successfully";
pub const ENTRY_DELETED: &str = "Entry deleted successfully";
pub const ENTRY_NOT_FOUND: &str = "No entry found to update";

#[utoipa::path(
    get,
    path = "/entries",
    responses(
        (status = 200, description = "Every entry, ordered by srno", body = [Entry]),
        (status = 500, description = "Store failure", body = MessageResponse)
    )
)]
pub async fn list_entries_handler(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(entries) => {
            tracing::debug!(count = entries.len(), "listed entries");
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(e) => store_failure("select", e),
    }
}

#[utoipa::path(
    post,
    path = "/entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = MessageResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = MessageResponse),
        (status = 500, description = "Store failure, including a duplicate srno", body = MessageResponse)
    )
)]
pub async fn create_entry_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"srno\": int, \"name\": str, \"branch\": str, \"rollno\": str}")
                .into_response()
        }
    };

    let entry = match request.into_entry() {
        Ok(entry) => entry,
        Err(e) => return store_failure("insert", e),
    };

    match state.store.insert(&entry).await {
        Ok(()) => {
            tracing::info!(srno = entry.srno, "entry added");
            (StatusCode::CREATED, Json(MessageResponse::new(ENTRY_ADDED))).into_response()
        }
        Err(e) => store_failure("insert", e),
    }
}

#[utoipa::path(
    put,
    path = "/entries/{srno}",
    params(
        ("srno" = String, Path, description = "Serial number of the entry to update; read like parseInt, so trailing characters are ignored")
    ),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = String, content_type = "text/plain"),
        (status = 404, description = "No entry with this srno", body = MessageResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = MessageResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    )
)]
pub async fn update_entry_handler(
    State(state): State<AppState>,
    Path(raw_srno): Path<String>,
    request: Result<Json<UpdateEntryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"name\": str, \"branch\": str, \"rollno\": str}").into_response()
        }
    };

    let fields = match request.into_fields() {
        Ok(fields) => fields,
        Err(e) => return store_failure("update", e),
    };

    let Some(srno) = srno_from_path(&raw_srno) else {
        return (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new(ENTRY_NOT_FOUND)),
        )
            .into_response();
    };

    match state.store.update(srno, &fields).await {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new(ENTRY_NOT_FOUND)),
        )
            .into_response(),
        Ok(_) => {
            tracing::info!(srno, "entry updated");
            (StatusCode::OK, ENTRY_UPDATED).into_response()
        }
        Err(e) => store_failure("update", e),
    }
}

#[utoipa::path(
    delete,
    path = "/entries/{srno}",
    params(
        ("srno" = String, Path, description = "Serial number of the entry to delete; read like parseInt, so trailing characters are ignored")
    ),
    responses(
        (status = 200, description = "Entry deleted (or was already absent)", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = MessageResponse)
    )
)]
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(raw_srno): Path<String>,
) -> Response {
    // Nothing can match an unparseable serial number; that is still a successful delete.
    let Some(srno) = srno_from_path(&raw_srno) else {
        return (StatusCode::OK, ENTRY_DELETED).into_response();
    };

    match state.store.delete(srno).await {
        Ok(affected) => {
            tracing::info!(srno, affected, "entry delete");
            (StatusCode::OK, ENTRY_DELETED).into_response()
        }
        Err(e) => store_failure("delete", e),
    }
}
