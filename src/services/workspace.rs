//! Per-request scratch directory.
//!
//! Every staged upload and compressor output of a request lives inside one
//! uniquely named directory under the configured temp root. The handler
//! closes the [`RequestWorkspace`] when it finishes; dropping it removes the
//! directory on any other path.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, warn};

use crate::services::error::StagingError;

const WORKSPACE_PREFIX: &str = "pdfmagic-";
const INPUT_FILE_NAME: &str = "input.pdf";
const OUTPUT_FILE_NAME: &str = "compressed.pdf";

#[derive(Debug)]
pub struct RequestWorkspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl RequestWorkspace {
    pub fn create_in(root: &Path) -> Result<Self, StagingError> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|source| StagingError::Create {
                path: root.to_path_buf(),
                source,
            })?;
        let path = dir.path().to_path_buf();
        debug!("Created request workspace {}", path.display());

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn input_path(&self) -> PathBuf {
        self.path.join(INPUT_FILE_NAME)
    }

    pub fn output_path(&self) -> PathBuf {
        self.path.join(OUTPUT_FILE_NAME)
    }

    /// Opens the staged input file for writing, truncating any previous content.
    pub async fn create_input(&self) -> Result<StagedWriter, StagingError> {
        let path = self.input_path();
        let file = File::create(&path)
            .await
            .map_err(|source| StagingError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(StagedWriter {
            file,
            path,
            written: 0,
        })
    }

    /// Removes the workspace on the blocking pool so large uploads are not
    /// deleted on a runtime worker thread.
    pub async fn close(mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        let path = self.path.clone();

        match tokio::task::spawn_blocking(move || dir.close()).await {
            Ok(result) => log_removal(&path, result),
            Err(e) => warn!("Cleanup task for {} did not complete: {}", path.display(), e),
        }
    }

    fn remove(&mut self) {
        if let Some(dir) = self.dir.take() {
            log_removal(&self.path, dir.close());
        }
    }
}

fn log_removal(path: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => debug!("Removed request workspace {}", path.display()),
        Err(source) => {
            let error = StagingError::Cleanup {
                path: path.to_path_buf(),
                source,
            };
            warn!("{}", error);
        }
    }
}

impl Drop for RequestWorkspace {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Streams an upload onto disk chunk by chunk.
pub struct StagedWriter {
    file: File,
    path: PathBuf,
    written: u64,
}

impl StagedWriter {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StagingError> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|source| StagingError::Write {
                path: self.path.clone(),
                source,
            })?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// Flushes to disk and returns the staged path and byte count.
    pub async fn finish(mut self) -> Result<(PathBuf, u64), StagingError> {
        self.file
            .flush()
            .await
            .map_err(|source| StagingError::Write {
                path: self.path.clone(),
                source,
            })?;
        Ok((self.path, self.written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_workspace_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let workspace = RequestWorkspace::create_in(root.path()).unwrap();

        let mut writer = workspace.create_input().await.unwrap();
        writer.write_chunk(b"%PDF-1.4\n").await.unwrap();
        writer.write_chunk(b"%%EOF\n").await.unwrap();
        let (path, size) = writer.finish().await.unwrap();

        assert_eq!(size, 15);
        assert!(path.exists());
        std::fs::write(workspace.output_path(), b"out").unwrap();
        assert_eq!(entries(root.path()), 1);

        drop(workspace);
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_workspaces_do_not_collide() {
        let root = tempfile::tempdir().unwrap();
        let first = RequestWorkspace::create_in(root.path()).unwrap();
        let second = RequestWorkspace::create_in(root.path()).unwrap();

        assert_ne!(first.path(), second.path());
        assert_ne!(first.input_path(), second.input_path());
        assert!(first
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(WORKSPACE_PREFIX));
    }

    #[tokio::test]
    async fn test_close_removes_workspace() {
        let root = tempfile::tempdir().unwrap();
        let workspace = RequestWorkspace::create_in(root.path()).unwrap();
        let mut writer = workspace.create_input().await.unwrap();
        writer.write_chunk(&vec![0u8; 64 * 1024]).await.unwrap();
        writer.finish().await.unwrap();

        workspace.close().await;
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_close_after_external_delete_does_not_panic() {
        let root = tempfile::tempdir().unwrap();
        let workspace = RequestWorkspace::create_in(root.path()).unwrap();
        std::fs::remove_dir_all(workspace.path()).unwrap();
        workspace.close().await;
    }

    #[test]
    fn test_missing_root_is_a_staging_error() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("does-not-exist");
        let err = RequestWorkspace::create_in(&missing).unwrap_err();
        assert!(matches!(err, StagingError::Create { .. }));
    }

    #[test]
    fn test_already_deleted_workspace_does_not_panic() {
        let root = tempfile::tempdir().unwrap();
        let workspace = RequestWorkspace::create_in(root.path()).unwrap();
        std::fs::remove_dir_all(workspace.path()).unwrap();
        drop(workspace);
    }
}
