/// Ghostscript output preset, from smallest output to highest fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionProfile {
    Screen,
    #[default]
    Printer,
    Prepress,
}

impl CompressionProfile {
    /// Maps a 0-100 quality level onto a profile: `[0,33]` is Screen,
    /// `[34,66]` is Printer and `[67,100]` is Prepress.
    pub fn from_quality(quality: u8) -> Self {
        match quality {
            0..=33 => CompressionProfile::Screen,
            34..=66 => CompressionProfile::Printer,
            _ => CompressionProfile::Prepress,
        }
    }

    /// Value for Ghostscript's `-dPDFSETTINGS`.
    pub fn pdf_settings(&self) -> &'static str {
        match self {
            CompressionProfile::Screen => "/screen",
            CompressionProfile::Printer => "/printer",
            CompressionProfile::Prepress => "/prepress",
        }
    }
}

pub const BICUBIC_COLOR_RESOLUTION_DPI: u32 = 150;
pub const DOWNSAMPLE_COLOR_RESOLUTION_DPI: u32 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompressionRequest {
    pub target_size_mb: Option<f64>,
    /// `None` when the quality field was missing or not a number.
    pub quality: Option<u8>,
    pub optimize_images: bool,
    pub downsample_images: bool,
    pub remove_metadata: bool,
}

impl CompressionRequest {
    pub fn profile(&self) -> CompressionProfile {
        self.quality
            .map(CompressionProfile::from_quality)
            .unwrap_or_default()
    }

    pub fn options(&self) -> CompressionOptions {
        CompressionOptions {
            profile: self.profile(),
            optimize_images: self.optimize_images,
            downsample_images: self.downsample_images,
        }
    }
}

/// What the external compressor needs to know about one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressionOptions {
    pub profile: CompressionProfile,
    pub optimize_images: bool,
    pub downsample_images: bool,
}

impl CompressionOptions {
    /// Color image resolution the compressor ends up applying. Downsampling
    /// is passed after optimization, so its 72 DPI wins when both are set.
    pub fn effective_color_resolution(&self) -> Option<u32> {
        if self.downsample_images {
            Some(DOWNSAMPLE_COLOR_RESOLUTION_DPI)
        } else if self.optimize_images {
            Some(BICUBIC_COLOR_RESOLUTION_DPI)
        } else {
            None
        }
    }
}
