use std::{
    ffi::OsString,
    path::Path,
    process::Stdio,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::{
    application::{error::ApplicationError, services::PdfCompressor},
    domain::models::compression::{
        CompressionOptions, BICUBIC_COLOR_RESOLUTION_DPI, DOWNSAMPLE_COLOR_RESOLUTION_DPI,
    },
    services::error::CompressorError,
};

const COMPATIBILITY_LEVEL: &str = "1.4";

pub struct GhostscriptCompressor {
    program: String,
    timeout: Duration,
}

impl GhostscriptCompressor {
    pub fn new(program: String, timeout: Duration) -> Self {
        Self { program, timeout }
    }

    /// Full argument list for one run. Later flags override earlier ones in
    /// Ghostscript, so the 72 DPI downsample setting must stay after the
    /// 150 DPI optimize setting.
    pub fn build_args(options: &CompressionOptions, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-sDEVICE=pdfwrite".into(),
            format!("-dCompatibilityLevel={}", COMPATIBILITY_LEVEL).into(),
            format!("-dPDFSETTINGS={}", options.profile.pdf_settings()).into(),
            "-dNOPAUSE".into(),
            "-dQUIET".into(),
            "-dBATCH".into(),
        ];

        if options.optimize_images {
            args.push("-dColorImageDownsampleType=/Bicubic".into());
            args.push(format!("-dColorImageResolution={}", BICUBIC_COLOR_RESOLUTION_DPI).into());
        }

        if options.downsample_images {
            args.push("-dDownsampleColorImages=true".into());
            args.push(format!("-dColorImageResolution={}", DOWNSAMPLE_COLOR_RESOLUTION_DPI).into());
        }

        let mut output_arg = OsString::from("-sOutputFile=");
        output_arg.push(output.as_os_str());
        args.push(output_arg);
        args.push(input.as_os_str().to_owned());

        args
    }

    async fn run(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressionOptions,
    ) -> Result<(), CompressorError> {
        let args = Self::build_args(options, input, output);
        debug!("Running {} {:?}", self.program, args);

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CompressorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let started = Instant::now();
        let result = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CompressorError::Timeout {
                program: self.program.clone(),
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|source| CompressorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            error!("{} failed ({}): {}", self.program, result.status, stderr);
            return Err(CompressorError::ExitStatus {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr,
            });
        }

        info!(
            profile = options.profile.pdf_settings(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Ghostscript compression finished"
        );

        Ok(())
    }
}

#[async_trait]
impl PdfCompressor for GhostscriptCompressor {
    async fn compress(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressionOptions,
    ) -> Result<(), ApplicationError> {
        self.run(input, output, options).await.map_err(Into::into)
    }

    fn name(&self) -> &str {
        &self.program
    }
}
