use std::time::Duration;

/// How a dragged rectangle maps onto the canvas when it is zoomed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectZoomMode {
    /// The whole rectangle stays visible.
    #[default]
    Fit,
    /// The rectangle covers the whole canvas, cropping the longer side.
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionLimits {
    pub double_tap_window: Duration,
    pub double_tap_distance: f64,
    pub rect_min_size: f64,
    pub pinch_grace: Duration,
    pub wheel_sensitivity: f64,
    pub rect_zoom_mode: RectZoomMode,
    pub min_pinch_distance: f64,
}

impl InteractionLimits {
    #[must_use]
    pub fn wheel_factor(&self, delta_y: f64) -> f64 {
        (delta_y * self.wheel_sensitivity).exp()
    }
}

impl Default for InteractionLimits {
    fn default() -> Self {
        Self {
            double_tap_window: Duration::from_millis(300),
            double_tap_distance: 30.0,
            rect_min_size: 6.0,
            pinch_grace: Duration::from_millis(100),
            wheel_sensitivity: 0.0015,
            rect_zoom_mode: RectZoomMode::Fit,
            min_pinch_distance: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_finite_and_consistent() {
        let limits = InteractionLimits::default();

        assert!(limits.double_tap_distance.is_finite() && limits.double_tap_distance > 0.0);
        assert!(limits.rect_min_size.is_finite() && limits.rect_min_size > 0.0);
        assert!(limits.wheel_sensitivity.is_finite() && limits.wheel_sensitivity > 0.0);
        assert!(limits.min_pinch_distance > 0.0);
        assert!(limits.pinch_grace < limits.double_tap_window);
        assert_eq!(limits.rect_zoom_mode, RectZoomMode::Fit);
    }

    #[test]
    fn negative_wheel_delta_zooms_in() {
        let limits = InteractionLimits::default();

        assert!(limits.wheel_factor(-100.0) < 1.0);
        assert!(limits.wheel_factor(100.0) > 1.0);
        assert_eq!(limits.wheel_factor(0.0), 1.0);
    }
}
