use std::path::PathBuf;

use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum CompressorError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} did not finish within {seconds}s")]
    Timeout { program: String, seconds: u64 },

    #[error("Compressor produced no output at {0}")]
    MissingOutput(PathBuf),
}

impl From<CompressorError> for ApplicationError {
    fn from(error: CompressorError) -> Self {
        ApplicationError::CompressionFailed(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Compressed output is not a readable PDF: {0}")]
    Parse(String),

    #[error("Document structure is invalid: {0}")]
    Structure(String),

    #[error("Failed to serialize PDF: {0}")]
    Serialize(String),
}

impl From<MetadataError> for ApplicationError {
    fn from(error: MetadataError) -> Self {
        ApplicationError::MetadataEditFailed(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Failed to create request workspace in {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<StagingError> for ApplicationError {
    fn from(error: StagingError) -> Self {
        ApplicationError::InternalError(format!("Staging error: {}", error))
    }
}
