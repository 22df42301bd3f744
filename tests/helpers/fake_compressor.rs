use std::{path::Path, sync::Mutex, time::Duration};

use async_trait::async_trait;
use pdfmagic_service::{
    application::{error::ApplicationError, services::PdfCompressor},
    domain::models::compression::CompressionOptions,
};

pub const FAILURE_DETAIL: &str = "/var/tmp/secret/input.pdf: Unrecoverable error, exit code 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeBehavior {
    /// Copies the input to the output unchanged
    Copy,
    /// Reports a tool failure
    Fail,
    /// Succeeds without writing anything
    NoOutput,
    /// Writes bytes that are not a PDF
    Garbage,
}

/// Stand-in for Ghostscript that records the options of every call
pub struct FakeCompressor {
    behavior: FakeBehavior,
    calls: Mutex<Vec<CompressionOptions>>,
}

impl FakeCompressor {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CompressionOptions> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> CompressionOptions {
        *self.calls.lock().unwrap().last().expect("compressor was not called")
    }
}

#[async_trait]
impl PdfCompressor for FakeCompressor {
    async fn compress(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressionOptions,
    ) -> Result<(), ApplicationError> {
        self.calls.lock().unwrap().push(*options);

        // Give concurrent requests a chance to interleave
        tokio::time::sleep(Duration::from_millis(5)).await;

        match self.behavior {
            FakeBehavior::Copy => {
                tokio::fs::copy(input, output)
                    .await
                    .map_err(|e| ApplicationError::CompressionFailed(e.to_string()))?;
                Ok(())
            }
            FakeBehavior::Fail => Err(ApplicationError::CompressionFailed(
                FAILURE_DETAIL.to_string(),
            )),
            FakeBehavior::NoOutput => Ok(()),
            FakeBehavior::Garbage => {
                tokio::fs::write(output, b"this is not a pdf document")
                    .await
                    .map_err(|e| ApplicationError::CompressionFailed(e.to_string()))?;
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}
