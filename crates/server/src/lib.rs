//! Precis HTTP server
//!
//! Axum front end for batch summarization.

pub mod config;
pub mod error;
pub mod form;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use error::ApiError;
pub use form::ArticleUrls;
pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/summarize", post(routes::summarize))
        .route("/summarize/outcomes", post(routes::summarize_outcomes))
        .route("/health", get(routes::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run_server(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Precis server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
