use std::path::Path;

use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::compression::CompressionOptions};

/// External PDF compression engine. Reads `input`, writes the result to
/// `output`. Callers verify that `output` exists afterwards.
#[async_trait]
pub trait PdfCompressor: Send + Sync {
    async fn compress(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressionOptions,
    ) -> Result<(), ApplicationError>;

    /// Short name used in logs and the health report.
    fn name(&self) -> &str;
}
