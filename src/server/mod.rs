//! HTTP adapter.
//!
//! Maps single-text and batch-file requests onto the cleansing pipeline and
//! wraps every result in the `{status_code, description, data}` envelope.
//! The lexicon is shared read-only between requests; nothing is written back.

pub mod docs;
pub mod envelope;
pub mod handlers;

pub use envelope::{ApiError, ApiResponse};

use crate::batch::BatchOptions;
use crate::cleanse::CleanseOptions;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::lexicon::Lexicon;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<Lexicon>,
    pub options: CleanseOptions,
    pub batch: Arc<BatchOptions>,
}

impl AppState {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            options: CleanseOptions::default(),
            batch: Arc::new(BatchOptions::default()),
        }
    }

    pub fn with_options(mut self, options: CleanseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_batch(mut self, batch: BatchOptions) -> Self {
        self.batch = Arc::new(batch);
        self
    }
}

/// Builds the API router.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/text-processing", post(handlers::text_processing))
        .route("/text-processing-file", post(handlers::text_processing_file))
        .route(docs::SPEC_PATH, get(docs::spec))
        .route(docs::UI_PATH, get(docs::ui))
        .route("/docs", get(docs::redirect))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API until Ctrl-C or SIGTERM.
pub async fn serve(config: &ServerConfig, lexicon: Lexicon) -> Result<()> {
    let app = build_router(AppState::new(lexicon), config.max_upload_bytes);

    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received, draining connections");
}
