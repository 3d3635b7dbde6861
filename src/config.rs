//! Page-level configuration, read as JSON from the canvas `data-gallery`
//! attribute. Every key is optional.

use serde::Deserialize;

use crate::error::{GalleryError, Result};
use crate::tween::Motion;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryConfig {
    /// CSS selector for the images that become planes.
    pub image_selector: String,
    /// Camera distance from the z=0 plane, in CSS pixels.
    pub camera_distance: f32,
    pub near: f32,
    pub far: f32,
    pub max_pixel_ratio: f64,
    /// Grid subdivisions per plane edge.
    pub plane_segments: u16,
    /// Scales the shader's bulge and colour shift.
    pub distortion: f32,
    /// `crossOrigin` used when fetching textures; `null` to omit.
    pub cross_origin: Option<String>,
    pub hover: Motion,
    pub scroll: ScrollConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    pub enabled: bool,
    pub lerp: f32,
    pub wheel_multiplier: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { enabled: true, lerp: 0.1, wheel_multiplier: 1.0 }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_selector: "img".into(),
            camera_distance: 20.0,
            near: 0.1,
            far: 1000.0,
            max_pixel_ratio: 2.0,
            plane_segments: 24,
            distortion: 1.0,
            cross_origin: Some("anonymous".into()),
            hover: Motion::default(),
            scroll: ScrollConfig::default(),
            log_level: "info".into(),
        }
    }
}

impl GalleryConfig {
    /// Parse and validate. An empty or whitespace-only string yields defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: &str) -> Result<()> {
            Err(GalleryError::InvalidConfig(msg.into()))
        }
        if self.image_selector.trim().is_empty() {
            return invalid("imageSelector must not be empty");
        }
        if !(self.camera_distance > 0.0) {
            return invalid("cameraDistance must be positive");
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return invalid("near must be positive and less than far");
        }
        if !(self.max_pixel_ratio > 0.0) {
            return invalid("maxPixelRatio must be positive");
        }
        if !(self.hover.duration >= 0.0) {
            return invalid("hover.duration must not be negative");
        }
        if !(self.scroll.lerp > 0.0 && self.scroll.lerp <= 1.0) {
            return invalid("scroll.lerp must be in (0, 1]");
        }
        if self.log_level.parse::<log::Level>().is_err() {
            return invalid("logLevel must be one of error, warn, info, debug, trace");
        }
        Ok(())
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
