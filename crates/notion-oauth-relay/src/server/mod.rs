//! HTTP server for the OAuth relay.
//!
//! Each request is handled independently; the only shared mutable
//! state is the [`session::StateStore`] of pending anti-forgery
//! tokens.

pub mod handlers;
pub mod pages;
pub mod session;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::exchange::TokenExchanger;
use session::StateStore;

/// Shared state for the HTTP handlers.
pub struct AppState {
    /// Relay configuration, built once at startup.
    pub config: Config,

    /// Authorization-code exchanger.
    pub exchanger: TokenExchanger,

    /// Pending anti-forgery tokens keyed by session id.
    pub states: Arc<StateStore>,
}

/// Create the relay router.
///
/// The state store's cleanup task is started as a side effect.
#[must_use]
pub fn create_router(config: Config, exchanger: TokenExchanger) -> Router {
    let states = Arc::new(StateStore::new());
    Arc::clone(&states).start_cleanup_task();

    let state = Arc::new(AppState { config, exchanger, states });

    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/health", get(handlers::handle_health))
        .route("/authorize", get(handlers::handle_authorize))
        .route("/callback", get(handlers::handle_callback))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The relay server.
#[derive(Debug)]
pub struct RelayServer {
    config: Config,
    exchanger: TokenExchanger,
}

impl RelayServer {
    /// Create a new relay server.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let exchanger = TokenExchanger::new(&config)?;
        Ok(Self { config, exchanger })
    }

    /// Run the server until CTRL+C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or serve failure.
    pub async fn run(self, port: u16) -> anyhow::Result<()> {
        let router = create_router(self.config, self.exchanger);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("OAuth relay listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("OAuth relay shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to install CTRL+C handler");
    tracing::info!("Received shutdown signal");
}
