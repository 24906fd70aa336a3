//! Application state.

use precis_core::{ArticleService, BatchConfig};

/// Application state shared across handlers.
///
/// The service is built once at startup; cloning shares its clients.
#[derive(Clone)]
pub struct AppState {
    pub service: ArticleService,
    pub batch: BatchConfig,
}

impl AppState {
    pub fn new(service: ArticleService, batch: BatchConfig) -> Self {
        Self { service, batch }
    }
}
