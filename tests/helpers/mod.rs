#![allow(dead_code)]

pub mod fake_compressor;
pub mod fixtures;
pub mod logs;

use std::sync::Arc;

use axum_test::TestServer;
use pdfmagic_service::{build_router, AppConfig, AppState};
use tempfile::TempDir;

use fake_compressor::{FakeBehavior, FakeCompressor};

pub const INDEX_MARKER: &str = "pdfmagic-test-index";

/// Test application with an isolated temp root and static directory
pub struct TestApp {
    pub server: TestServer,
    pub compressor: Arc<FakeCompressor>,
    pub temp_root: TempDir,
    pub _static_dir: TempDir,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files or directories left behind in the temp root
    pub fn leftover_temp_entries(&self) -> usize {
        std::fs::read_dir(self.temp_root.path())
            .expect("temp root readable")
            .count()
    }
}

pub fn setup_test_app(behavior: FakeBehavior) -> TestApp {
    setup_test_app_with(behavior, |_| {})
}

pub fn setup_test_app_with<F>(behavior: FakeBehavior, configure: F) -> TestApp
where
    F: FnOnce(&mut AppConfig),
{
    let temp_root = tempfile::tempdir().expect("Failed to create temp root");
    let static_dir = tempfile::tempdir().expect("Failed to create static dir");
    std::fs::write(
        static_dir.path().join("index.html"),
        format!("<html><body>{}</body></html>", INDEX_MARKER),
    )
    .expect("Failed to write index.html");

    let mut config = AppConfig {
        temp_dir: temp_root.path().to_path_buf(),
        static_dir: static_dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    configure(&mut config);

    let compressor = Arc::new(FakeCompressor::new(behavior));
    let app_state = AppState::new(config, compressor.clone());
    let server = TestServer::new(build_router(app_state)).expect("Failed to start test server");

    TestApp {
        server,
        compressor,
        temp_root,
        _static_dir: static_dir,
    }
}
