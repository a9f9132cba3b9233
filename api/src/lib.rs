use std::{net::SocketAddr, sync::Arc};

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use listing_audit::{LexiconAnalyzer, ListingAuditor};
use listing_scraper::ListingScraper;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    core::app_state::{AppConfig, AppState},
    error_handler::AppError,
    middleware_layer::audit_quota::enforce_audit_quota,
    routes::{audit::audit_route::audit_route, health_route::health_route},
};

/// Builds the HTTP router over `state`.
///
/// Only `/audit` counts against the per-client allowance.
pub fn router(state: Arc<AppState>) -> Router {
    let audit = Router::new()
        .route("/audit", post(audit_route))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_audit_quota,
        ));

    Router::new()
        .merge(audit)
        .route("/health", get(health_route))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wires the production collaborators into an auditor.
pub fn build_auditor(config: &AppConfig) -> Result<ListingAuditor, AppError> {
    let scraper = Arc::new(ListingScraper::from_config(config.scraper.clone())?);
    Ok(ListingAuditor::new(
        scraper.clone(),
        scraper,
        Arc::new(LexiconAnalyzer::new()),
        config.review_policy.clone(),
    ))
}

pub async fn start() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let auditor = build_auditor(&config)?;
    let address = config.api_address.clone();
    let state = AppState::new(config, auditor);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(AppError::Bind)?;
    info!(%address, limit = state.quota.limit(), "listing audit API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(AppError::Server)?;

    info!("listing audit API stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
