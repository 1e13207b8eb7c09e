use crate::constants::{MAX_PIXEL_RATIO, MIN_PIXEL_RATIO};

/// Render area size in CSS pixels plus the clamped device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    #[inline]
    pub fn is_landscape(&self) -> bool {
        self.width >= self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

#[inline]
pub fn clamp_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() {
        dpr.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
    } else {
        MIN_PIXEL_RATIO
    }
}

/// Start-up configuration of the experience.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperienceConfig {
    /// Debug mode: verbose logging, bounds outlines and opaque section containers.
    pub debug: bool,
    pub viewport: Viewport,
    /// Seed for orbit layout; fixed seeds give reproducible layouts.
    pub seed: u64,
}

impl ExperienceConfig {
    /// Builds the config from what the page exposes. A zero height falls back
    /// to `fallback_height` (the window's inner height).
    pub fn from_page(
        location_hash: &str,
        width: f32,
        height: f32,
        fallback_height: f32,
        device_pixel_ratio: f64,
        seed: u64,
    ) -> Self {
        let height = if height > 0.0 { height } else { fallback_height };
        Self {
            debug: location_hash == "#debug",
            viewport: Viewport::new(width, height, device_pixel_ratio),
            seed,
        }
    }
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            debug: false,
            viewport: Viewport::default(),
            seed: 42,
        }
    }
}
