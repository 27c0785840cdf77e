//! Display metrics and unit conversion.

/// Density information for the display a [`UiContext`](crate::UiContext)
/// renders to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Device pixels per density-independent pixel.
    pub density: f32,
    /// Device pixels per scale-independent (text) pixel.
    pub scaled_density: f32,
    /// Height of the system status bar in device pixels.
    pub status_bar_height: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            scaled_density: 1.0,
            status_bar_height: 24.0,
        }
    }
}

impl DisplayMetrics {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_scaled_density(mut self, scaled_density: f32) -> Self {
        self.scaled_density = scaled_density;
        self
    }

    pub fn with_status_bar_height(mut self, height: f32) -> Self {
        self.status_bar_height = height;
        self
    }

    /// Convert density-independent pixels to whole device pixels, rounding half up.
    pub fn dp_to_px(&self, dp: f32) -> f32 {
        (dp * self.density + 0.5).floor()
    }

    /// Convert scale-independent pixels to device pixels.
    pub fn sp_to_px(&self, sp: f32) -> f32 {
        sp * self.scaled_density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_to_px_rounds_half_up() {
        let metrics = DisplayMetrics::default().with_density(1.5);
        assert_eq!(metrics.dp_to_px(10.0), 15.0);
        assert_eq!(metrics.dp_to_px(1.0), 2.0);
        assert_eq!(metrics.dp_to_px(0.0), 0.0);
    }

    #[test]
    fn test_sp_to_px() {
        let metrics = DisplayMetrics::default().with_scaled_density(2.0);
        assert_eq!(metrics.sp_to_px(14.0), 28.0);
    }
}
