use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sysinfo::System;
use tracing::info;

use crate::adapters::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "uptimeSeconds")]
    pub uptime_seconds: i64,
    pub compression: CompressionInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

#[derive(Debug, Serialize)]
pub struct CompressionInfo {
    pub compressor: String,
    #[serde(rename = "ghostscriptPath")]
    pub ghostscript_path: String,
    #[serde(rename = "maxConcurrentCompressions")]
    pub max_concurrent_compressions: usize,
    #[serde(rename = "availableSlots")]
    pub available_slots: usize,
    #[serde(rename = "timeoutSeconds")]
    pub timeout_seconds: u64,
    #[serde(rename = "maxUploadBytes")]
    pub max_upload_bytes: usize,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/v1/health
    pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
        info!("Health check requested");

        let compression = CompressionInfo {
            compressor: app_state.compressor.name().to_string(),
            ghostscript_path: app_state.config.ghostscript_path.clone(),
            max_concurrent_compressions: app_state.config.max_concurrent_compressions,
            available_slots: app_state.compression_slots.available_permits(),
            timeout_seconds: app_state.config.compression_timeout_secs,
            max_upload_bytes: app_state.config.max_upload_bytes,
        };

        // Only refresh what's reported
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        let metrics = SystemMetrics {
            cpu_usage_percent: sys.global_cpu_usage(),
            memory_used_bytes: memory_used,
            memory_total_bytes: memory_total,
            memory_usage_percent,
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            started_at: app_state.started_at,
            uptime_seconds: (Utc::now() - app_state.started_at).num_seconds(),
            compression,
            metrics,
        })
    }
}
