use tracing::warn;

use crate::domain::models::compression::CompressionRequest;

/// Raw text fields of a compression upload, exactly as the form sent them.
#[derive(Debug, Default, Clone)]
pub struct CompressionFormDTO {
    pub target_size: Option<String>,
    pub quality: Option<String>,
    pub optimize_images: Option<String>,
    pub remove_metadata: Option<String>,
    pub downsample_images: Option<String>,
}

impl CompressionFormDTO {
    pub fn is_field(name: &str) -> bool {
        matches!(
            name,
            "targetSize" | "quality" | "optimizeImages" | "removeMetadata" | "downsampleImages"
        )
    }

    /// Stores a text field by its form name. Returns false for unknown names.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "targetSize" => &mut self.target_size,
            "quality" => &mut self.quality,
            "optimizeImages" => &mut self.optimize_images,
            "removeMetadata" => &mut self.remove_metadata,
            "downsampleImages" => &mut self.downsample_images,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

impl From<CompressionFormDTO> for CompressionRequest {
    fn from(value: CompressionFormDTO) -> Self {
        CompressionRequest {
            target_size_mb: value.target_size.as_deref().and_then(parse_target_size),
            quality: value.quality.as_deref().and_then(parse_quality),
            optimize_images: parse_flag("optimizeImages", value.optimize_images.as_deref()),
            downsample_images: parse_flag("downsampleImages", value.downsample_images.as_deref()),
            remove_metadata: parse_flag("removeMetadata", value.remove_metadata.as_deref()),
        }
    }
}

/// Integer quality clamped to 0-100. Decimals are truncated; anything that
/// is not a finite number yields `None`.
pub fn parse_quality(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    let value = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let float = raw.parse::<f64>().ok().filter(|f| f.is_finite())?;
            float.trunc() as i64
        }
    };
    Some(value.clamp(0, 100) as u8)
}

/// Positive, finite megabyte count. Zero and negatives mean "no target".
pub fn parse_target_size(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Only the exact string `true` enables a flag. Anything else is false.
pub fn parse_flag(name: &str, raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };

    match raw.trim() {
        "true" => true,
        "false" | "" => false,
        other => {
            warn!("Unrecognised value '{}' for {}, treating as false", other, name);
            false
        }
    }
}
