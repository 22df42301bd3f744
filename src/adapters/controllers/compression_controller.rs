use std::io::ErrorKind;

use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::Response,
};
use tracing::{debug, info, warn};

use crate::{
    adapters::state::AppState,
    application::{dto::compression_form_dto::CompressionFormDTO, error::ApplicationError},
    domain::models::{
        compression::CompressionRequest,
        file::{is_pdf_mime_type, CompressedArtifact, UploadedFile},
    },
    services::{strip_metadata, CompressorError, RequestWorkspace, StagingError},
};

pub const PDF_FIELD: &str = "pdf";

pub struct CompressionController;

impl CompressionController {
    /// Compresses one uploaded PDF and returns it as an attachment
    /// POST /compress
    /// Multipart: `pdf` file plus `targetSize`, `quality`, `optimizeImages`,
    /// `removeMetadata` and `downsampleImages` text fields
    pub async fn compress(
        State(app_state): State<AppState>,
        multipart: Multipart,
    ) -> Result<Response, ApplicationError> {
        let workspace = RequestWorkspace::create_in(&app_state.config.temp_dir)?;

        let result = process(&app_state, &workspace, multipart).await;
        // Single exit point; Drop still removes the workspace if this future is cancelled.
        workspace.close().await;

        result
    }
}

async fn process(
    app_state: &AppState,
    workspace: &RequestWorkspace,
    multipart: Multipart,
) -> Result<Response, ApplicationError> {
    let (upload, form) = receive_upload(workspace, multipart).await?;
    let upload = upload.ok_or_else(|| {
        ApplicationError::InvalidInput(format!("Missing '{}' file field", PDF_FIELD))
    })?;
    let request = CompressionRequest::from(form);

    info!(
        filename = upload.original_filename.as_deref().unwrap_or("<unnamed>"),
        size = upload.size,
        profile = request.profile().pdf_settings(),
        optimize_images = request.optimize_images,
        downsample_images = request.downsample_images,
        remove_metadata = request.remove_metadata,
        "Compressing upload"
    );

    let mut artifact = run_compressor(app_state, workspace, &upload, &request).await?;

    if request.remove_metadata {
        let content = std::mem::take(&mut artifact.content);
        artifact.content = tokio::task::spawn_blocking(move || strip_metadata(&content))
            .await
            .map_err(|e| {
                ApplicationError::InternalError(format!("Metadata task failed: {}", e))
            })??;
    }

    if let Some(target_size_mb) = request.target_size_mb {
        if artifact.exceeds_target(target_size_mb) {
            warn!(
                compressed_mb = artifact.size_mb(),
                target_mb = target_size_mb,
                "Target size not fully achieved"
            );
        }
    }

    info!(
        original_bytes = upload.size,
        compressed_bytes = artifact.size(),
        "Compression complete"
    );

    let size = artifact.size();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", app_state.config.download_filename),
        )
        .body(Body::from(artifact.content))
        .map_err(|e| ApplicationError::InternalError(format!("Failed to build response: {}", e)))
}

/// Streams the `pdf` field into the workspace and collects the text fields.
async fn receive_upload(
    workspace: &RequestWorkspace,
    mut multipart: Multipart,
) -> Result<(Option<UploadedFile>, CompressionFormDTO), ApplicationError> {
    let mut upload: Option<UploadedFile> = None;
    let mut form = CompressionFormDTO::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        if name == PDF_FIELD {
            if upload.is_some() {
                return Err(ApplicationError::InvalidInput(
                    "More than one file uploaded".to_string(),
                ));
            }

            let mime_type = field.content_type().unwrap_or("").to_string();
            if !is_pdf_mime_type(&mime_type) {
                return Err(ApplicationError::InvalidInput(format!(
                    "Rejected upload with MIME type '{}'",
                    mime_type
                )));
            }
            let original_filename = field.file_name().map(str::to_string);

            let mut writer = workspace.create_input().await?;
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                writer.write_chunk(&chunk).await?;
            }
            let (path, size) = writer.finish().await?;

            upload = Some(UploadedFile {
                original_filename,
                mime_type,
                path,
                size,
            });
        } else if CompressionFormDTO::is_field(&name) {
            let value = field.text().await.map_err(multipart_error)?;
            form.set_field(&name, value);
        } else {
            debug!("Ignoring unexpected form field '{}'", name);
        }
    }

    Ok((upload, form))
}

async fn run_compressor(
    app_state: &AppState,
    workspace: &RequestWorkspace,
    upload: &UploadedFile,
    request: &CompressionRequest,
) -> Result<CompressedArtifact, ApplicationError> {
    let output_path = workspace.output_path();

    {
        let _permit = app_state
            .compression_slots
            .acquire()
            .await
            .map_err(|e| ApplicationError::InternalError(format!("Compression slots closed: {}", e)))?;

        app_state
            .compressor
            .compress(&upload.path, &output_path, &request.options())
            .await?;
    }

    let content = match tokio::fs::read(&output_path).await {
        Ok(content) if !content.is_empty() => content,
        Ok(_) => return Err(CompressorError::MissingOutput(output_path).into()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CompressorError::MissingOutput(output_path).into())
        }
        Err(source) => {
            return Err(StagingError::Read {
                path: output_path,
                source,
            }
            .into())
        }
    };

    Ok(CompressedArtifact::new(output_path, content))
}

fn multipart_error(error: MultipartError) -> ApplicationError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApplicationError::PayloadTooLarge
    } else {
        ApplicationError::InvalidInput(format!("Invalid multipart data: {}", error.body_text()))
    }
}
