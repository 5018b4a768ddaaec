// src/bin/api_server.rs

use std::sync::Arc;
use student_records::infra::config::{self, StoreBackend};
use student_records::infra::logging;
use student_records::storage::{EntryStore, MemoryEntryStore, PostgresEntryStore};
use student_records::transport;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_tracing(config::log_json());

    // --- Record Store Initialization ---
    let store: Arc<dyn EntryStore> = match config::store_backend()? {
        StoreBackend::Postgres => {
            tracing::info!("connecting to postgres record store");
            let store = PostgresEntryStore::connect(
                &config::database_url()?,
                config::db_max_connections()?,
            )
            .await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory record store, data is lost on exit");
            Arc::new(MemoryEntryStore::new())
        }
    };
    let app_state = transport::http::AppState { store };

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let host = config::bind_host();
    let listener = transport::http::bind_first_available(&host, &config::bind_ports()?).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "API server listening");
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
