use crate::domain::entry::{Entry, EntryFields};
use crate::transport::http::handlers::{entries, health};
use crate::transport::http::types::{
    ApiResponse, CreateEntryRequest, MessageResponse, UpdateEntryRequest,
};
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        entries::list_entries_handler,
        entries::create_entry_handler,
        entries::update_entry_handler,
        entries::delete_entry_handler
    ),
    components(schemas(
        Entry,
        EntryFields,
        CreateEntryRequest,
        UpdateEntryRequest,
        MessageResponse,
        ApiResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/entries",
            get(entries::list_entries_handler).post(entries::create_entry_handler),
        )
        .route(
            "/entries/:srno",
            put(entries::update_entry_handler).delete(entries::delete_entry_handler),
        )
        .with_state(app_state)
}
