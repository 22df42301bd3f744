mod error;
mod ghostscript;
mod pdf_metadata;
mod workspace;

pub use error::{CompressorError, MetadataError, StagingError};
pub use ghostscript::GhostscriptCompressor;
pub use pdf_metadata::{strip_metadata, CLEARED_INFO_KEYS};
pub use workspace::{RequestWorkspace, StagedWriter};

use std::{sync::Arc, time::Duration};

use crate::{application::services::PdfCompressor, domain::config::app::AppConfig};

pub fn create_compressor(config: &AppConfig) -> Arc<dyn PdfCompressor> {
    Arc::new(GhostscriptCompressor::new(
        config.ghostscript_path.clone(),
        Duration::from_secs(config.compression_timeout_secs),
    ))
}
