// SPDX-License-Identifier: MPL-2.0
//! Typed CDN delivery options and URL building.
//!
//! The delivery transform is an explicit structure with named, validated
//! fields; every field is optional and omitted fields contribute no URL
//! segment, so the default transform delivers the original upload
//! untouched.

/// Minimum accepted delivery dimension in pixels.
pub const MIN_TRANSFORM_DIMENSION: u32 = 16;

/// Maximum accepted delivery dimension in pixels.
pub const MAX_TRANSFORM_DIMENSION: u32 = 4096;

/// Delivery quality setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// Let the CDN pick a quality level (`q_auto`).
    Auto,
    /// Fixed quality percentage, clamped to 1–100.
    Fixed(u8),
}

impl Quality {
    /// Creates a fixed quality level, clamping to the 1–100 range.
    #[must_use]
    pub fn fixed(value: u8) -> Self {
        Self::Fixed(value.clamp(1, 100))
    }

    fn segment(self) -> String {
        match self {
            Quality::Auto => "q_auto".to_string(),
            Quality::Fixed(q) => format!("q_{q}"),
        }
    }
}

/// Crop strategy applied when both dimensions are constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    Fill,
    Fit,
    Scale,
    Thumb,
}

impl CropMode {
    fn segment(self) -> &'static str {
        match self {
            CropMode::Fill => "c_fill",
            CropMode::Fit => "c_fit",
            CropMode::Scale => "c_scale",
            CropMode::Thumb => "c_thumb",
        }
    }
}

/// Focus point for cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    Auto,
    Center,
    Face,
}

impl Gravity {
    fn segment(self) -> &'static str {
        match self {
            Gravity::Auto => "g_auto",
            Gravity::Center => "g_center",
            Gravity::Face => "g_face",
        }
    }
}

/// Delivery format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFormat {
    Auto,
    WebP,
    Avif,
    Jpg,
    Png,
}

impl DeliveryFormat {
    fn segment(self) -> &'static str {
        match self {
            DeliveryFormat::Auto => "f_auto",
            DeliveryFormat::WebP => "f_webp",
            DeliveryFormat::Avif => "f_avif",
            DeliveryFormat::Jpg => "f_jpg",
            DeliveryFormat::Png => "f_png",
        }
    }
}

/// Validated delivery transform.
///
/// Defaults to no transformation at all: no resize, CDN-chosen nothing —
/// the original upload is delivered as stored. Dimensions set through the
/// builder methods are clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageTransform {
    /// Target width in pixels, if constrained.
    pub width: Option<u32>,
    /// Target height in pixels, if constrained.
    pub height: Option<u32>,
    /// Crop strategy; only meaningful together with a dimension.
    pub crop: Option<CropMode>,
    /// Crop focus point.
    pub gravity: Option<Gravity>,
    /// Quality override.
    pub quality: Option<Quality>,
    /// Format override.
    pub format: Option<DeliveryFormat>,
}

impl ImageTransform {
    /// Creates an empty transform (original delivery).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains the delivery width, clamped to the supported range.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width.clamp(MIN_TRANSFORM_DIMENSION, MAX_TRANSFORM_DIMENSION));
        self
    }

    /// Constrains the delivery height, clamped to the supported range.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.clamp(MIN_TRANSFORM_DIMENSION, MAX_TRANSFORM_DIMENSION));
        self
    }

    /// Sets the crop strategy.
    #[must_use]
    pub fn crop(mut self, crop: CropMode) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Sets the crop focus point.
    #[must_use]
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }

    /// Sets the quality override.
    #[must_use]
    pub fn quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Sets the format override.
    #[must_use]
    pub fn format(mut self, format: DeliveryFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Returns the comma-joined URL segment, empty when nothing is set.
    #[must_use]
    pub fn segment(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(w) = self.width {
            parts.push(format!("w_{w}"));
        }
        if let Some(h) = self.height {
            parts.push(format!("h_{h}"));
        }
        if let Some(crop) = self.crop {
            parts.push(crop.segment().to_string());
        }
        if let Some(gravity) = self.gravity {
            parts.push(gravity.segment().to_string());
        }
        if let Some(quality) = self.quality {
            parts.push(quality.segment());
        }
        if let Some(format) = self.format {
            parts.push(format.segment().to_string());
        }

        parts.join(",")
    }
}

/// Builds the delivery URL for an uploaded file.
///
/// The transform segment is inserted between the upload root and the file
/// name only when non-empty.
#[must_use]
pub fn delivery_url(cloud_name: &str, file_name: &str, transform: &ImageTransform) -> String {
    let base = format!("https://res.cloudinary.com/{cloud_name}/image/upload");
    let segment = transform.segment();

    if segment.is_empty() {
        format!("{base}/{file_name}")
    } else {
        format!("{base}/{segment}/{file_name}")
    }
}
