// src/bin/api_server.rs

use parking_lot_manager::infra::{config, logging};
use parking_lot_manager::transport;
use parking_lot_manager::ParkingService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = config::Settings::from_env();
    logging::init_logger();

    // --- Store Initialization ---
    tracing::info!(database_url = %settings.database_url, "opening slot store");
    let parking = ParkingService::connect(&settings.database_url, settings.max_connections).await?;
    let counts = parking.counts().await?;
    tracing::info!(total = counts.total, free = counts.free, "slot store ready");

    let app_state = transport::http::AppState::new(parking.clone());

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "parking lot server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    parking.store().close().await;
    tracing::info!("slot store closed, shutdown complete");
    Ok(())
}
