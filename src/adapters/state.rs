use axum::extract::FromRef;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::{application::services::PdfCompressor, domain::config::app::AppConfig};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub compressor: Arc<dyn PdfCompressor>,
    /// Caps how many compressor processes run at once.
    pub compression_slots: Arc<Semaphore>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, compressor: Arc<dyn PdfCompressor>) -> Self {
        let slots = config.max_concurrent_compressions.max(1);
        Self {
            config: Arc::new(config),
            compressor,
            compression_slots: Arc::new(Semaphore::new(slots)),
            started_at: Utc::now(),
        }
    }
}
