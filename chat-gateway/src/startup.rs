//! Application startup and lifecycle management.
//!
//! Picks the completion provider from configuration, binds the HTTP listener
//! and serves the router until a shutdown signal arrives.

use crate::config::{GatewayConfig, LlmConfig};
use crate::handlers::{chat, health_check, index, not_found};
use crate::services::{
    CompletionProvider, MockCompletionProvider, OpenAiCompletionProvider, OpenAiConfig,
};
use axum::{
    body::Body,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    completion: Option<Arc<dyn CompletionProvider>>,
}

impl AppState {
    /// State with an explicit provider. `None` means live mode without a
    /// credential.
    pub fn new(config: GatewayConfig, completion: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self {
            config: Arc::new(config),
            completion,
        }
    }

    /// State with the provider chosen from `config.llm`.
    pub fn from_config(config: GatewayConfig) -> Result<Self, AppError> {
        let completion = select_provider(&config.llm)?;
        Ok(Self::new(config, completion))
    }

    pub fn completion_provider(&self) -> Option<&Arc<dyn CompletionProvider>> {
        self.completion.as_ref()
    }
}

/// Mock mode wins over a configured key; live mode without a key yields no
/// provider.
pub fn select_provider(
    llm: &LlmConfig,
) -> Result<Option<Arc<dyn CompletionProvider>>, AppError> {
    if llm.mock_mode {
        tracing::info!("Mock mode enabled, using mock completion provider");
        return Ok(Some(Arc::new(MockCompletionProvider::new())));
    }

    let Some(api_key) = llm.api_key.clone() else {
        tracing::warn!("No LLM API key configured, /chat will answer with a configuration error");
        return Ok(None);
    };

    let provider = OpenAiCompletionProvider::new(OpenAiConfig {
        api_key,
        model: llm.model.clone(),
        api_base: llm.api_base.clone(),
    })
    .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

    tracing::info!(
        model = %provider.model(),
        api_base = %llm.api_base,
        "Initialized OpenAI completion provider"
    );

    Ok(Some(Arc::new(provider)))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/chat", post(chat))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        // Outermost so the trace span sees the assigned request id
        .layer(from_fn(request_id_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config)?;
        Self::build_with_state(state).await
    }

    /// Build around a prepared state, e.g. one holding a stub provider.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Chat gateway listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal is received.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
