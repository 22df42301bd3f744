use std::path::PathBuf;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A `pdf` form field written to the request workspace.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_filename: Option<String>,
    pub mime_type: String,
    pub path: PathBuf,
    pub size: u64,
}

pub fn is_pdf_mime_type(mime_type: &str) -> bool {
    mime_type.to_ascii_lowercase().contains("pdf")
}

/// Compressor output, held in memory once read back from disk.
#[derive(Debug, Clone)]
pub struct CompressedArtifact {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl CompressedArtifact {
    pub fn new(path: PathBuf, content: Vec<u8>) -> Self {
        Self { path, content }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn size_mb(&self) -> f64 {
        self.content.len() as f64 / BYTES_PER_MB
    }

    pub fn exceeds_target(&self, target_size_mb: f64) -> bool {
        self.size_mb() > target_size_mb
    }
}
