use crate::constants::{MAX_PIXEL_RATIO, MAX_TEXTURE_DIMENSION};
use crate::error::SceneError;

/// Window geometry as seen by the scene.
///
/// The half dimensions are derived, never set independently, so they always
/// equal `width / 2` and `height / 2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width: f64,
    pub height: f64,
    pub half_width: f64,
    pub half_height: f64,
    pub pixel_ratio: f64,
}

impl ViewportState {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            half_width: width * 0.5,
            half_height: height * 0.5,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Like [`ViewportState::new`] but rejects degenerate sizes.
    pub fn try_new(
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    ) -> Result<Self, SceneError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SceneError::EmptyViewport { width, height });
        }
        Ok(Self::new(width, height, device_pixel_ratio))
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        (self.width / self.height.max(1.0)) as f32
    }

    /// Backing-store size in physical pixels (CSS size times pixel ratio),
    /// scaled down to fit [`MAX_TEXTURE_DIMENSION`].
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).round() as u32;
        let h = (self.height * self.pixel_ratio).round() as u32;
        fit_within(w, h, MAX_TEXTURE_DIMENSION)
    }
}

/// Scale `(width, height)` uniformly so neither side exceeds `max`. Sides
/// are at least 1.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let (width, height, max) = (width.max(1), height.max(1), max.max(1));
    let longest = width.max(height);
    if longest <= max {
        return (width, height);
    }
    let scale = max as f64 / longest as f64;
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max);
    (fit(width), fit(height))
}

#[inline]
pub fn clamp_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(ViewportState::new(800.0, 600.0, 3.0).pixel_ratio, 2.0);
        assert_eq!(ViewportState::new(800.0, 600.0, 1.5).pixel_ratio, 1.5);
        assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
    }

    #[test]
    fn physical_size_scales_by_ratio() {
        let vp = ViewportState::new(640.0, 480.0, 2.0);
        assert_eq!(vp.physical_size(), (1280, 960));
    }

    #[test]
    fn zero_area_is_rejected() {
        assert_eq!(
            ViewportState::try_new(0.0, 100.0, 1.0),
            Err(SceneError::EmptyViewport {
                width: 0.0,
                height: 100.0
            })
        );
        assert!(ViewportState::try_new(100.0, f64::NAN, 1.0).is_err());
        assert!(ViewportState::try_new(1.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn physical_size_fits_texture_limit() {
        // 5K ultrawide at DPR 2 would be 10240 wide.
        let vp = ViewportState::new(5120.0, 1440.0, 2.0);
        assert_eq!(vp.physical_size(), (8192, 2304));
        assert_eq!(fit_within(10240, 2880, 4096), (4096, 1152));
        assert_eq!(fit_within(800, 600, 4096), (800, 600));
        assert_eq!(fit_within(0, 0, 4096), (1, 1));
    }
}
