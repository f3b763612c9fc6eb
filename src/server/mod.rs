//! HTTP surface: router assembly and server startup.

pub mod handlers;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::assistant::AssistantService;
use crate::catalog::Catalog;
use crate::insight::InsightGenerator;

/// Shared handles available to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub assistant: Arc<AssistantService>,
    pub insights: Arc<InsightGenerator>,
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Status endpoint
        .route("/api/status", get(handlers::status))
        // Catalog endpoints
        .route("/api/services", get(handlers::list_services))
        .route("/api/services/{segment}", get(handlers::get_service))
        .route("/api/team", get(handlers::list_team))
        .route("/api/team/{id}", get(handlers::get_team_member))
        .route("/api/process", get(handlers::get_process))
        // Contact endpoint
        .route("/api/contact", post(handlers::submit_contact))
        // Chat session endpoints
        .route("/api/chat/sessions", post(handlers::create_session))
        .route(
            "/api/chat/sessions/{id}",
            get(handlers::get_session).delete(handlers::end_session),
        )
        .route("/api/chat/sessions/{id}/open", post(handlers::open_session))
        .route("/api/chat/sessions/{id}/close", post(handlers::close_session))
        .route(
            "/api/chat/sessions/{id}/messages",
            post(handlers::send_message),
        )
        // Insight endpoints
        .route(
            "/api/services/{segment}/insight",
            get(handlers::get_insight).post(handlers::request_insight),
        )
        .with_state(state)
}

/// Binds and serves until shutdown.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests;
