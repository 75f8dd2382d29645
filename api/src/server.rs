//! Axum-based HTTP server for the KYC API.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::info;
use verdict_engine::{KycQueries, WorkflowEngine};
use verdict_store::IdentityStore;

use crate::handlers;
use crate::uploads::UploadStore;
use crate::validate::MAX_DOCUMENT_BYTES;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<dyn IdentityStore>,
    pub engine: Arc<WorkflowEngine>,
    pub queries: KycQueries,
    pub uploads: Arc<UploadStore>,
}

/// The HTTP server, configured with a port and shared state.
pub struct ApiServer {
    pub port: u16,
    pub state: AppState,
}

impl ApiServer {
    pub fn new(port: u16, state: AppState) -> Self {
        Self { port, state }
    }

    /// Build the router. Exposed separately so tests can drive the API
    /// without binding a socket.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/api/users", post(handlers::register_user))
            .route("/api/users/:user_id", get(handlers::get_user))
            .route(
                "/api/kyc/:user_id",
                post(handlers::upload_document).get(handlers::get_kyc),
            )
            // The transport cap sits above the document limit so the
            // explicit size check in the upload handler produces the
            // user-facing 400.
            .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES * 4))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Serve until `shutdown` receives a message (or all senders are gone).
    pub async fn start(self, mut shutdown: broadcast::Receiver<()>) -> std::io::Result<()> {
        let app = Self::router(self.state);
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("KYC API listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await
    }
}
