//! Application startup and lifecycle management.
//!
//! Both model artifacts are loaded before the listener is bound, so a
//! missing or corrupt artifact means the process never serves traffic.

use crate::config::{AppConfig, CorsConfig};
use crate::models::inference::PredictionService;
use crate::routes::{self, AppState};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the API router with CORS and request tracing layers.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Result<Router> {
    let origin = cors
        .allowed_origin
        .parse::<HeaderValue>()
        .context(format!("Invalid CORS origin '{}'", cors.allowed_origin))?;

    // Credentialed CORS cannot use wildcards, so methods and headers
    // mirror whatever the preflight asks for.
    let cors_layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .route("/", get(routes::root))
        .route("/predict", post(routes::predict))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Load the model artifacts, build the router, and bind the listener.
    pub async fn build(config: AppConfig) -> Result<Self> {
        let service = PredictionService::from_config(&config)?;
        let state = AppState {
            service: Arc::new(service),
        };

        let router = build_router(state, &config.cors)?;

        // Port 0 picks a random free port, used by the test suite
        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .context(format!("Failed to bind listener to {}", addr))?;
        let port = listener.local_addr()?.port();

        info!(addr = %addr, port = port, "Listener bound");

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
