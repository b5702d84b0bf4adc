use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::complex_point::ComplexPoint;

/// Scale floor, in plane units per device pixel. Below this f64 centre
/// coordinates near the set stop resolving distinct pixels.
pub const DEFAULT_MIN_SCALE: f64 = 1e-15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLimits {
    pub min_scale: f64,
    pub fit_real_span: f64,
    pub fit_imag_span: f64,
    pub home_center: ComplexPoint,
}

impl ViewLimits {
    /// Scale at which the classical bounds of the set fill the canvas.
    #[must_use]
    pub fn fit_scale(&self, size: CanvasSize) -> f64 {
        (self.fit_real_span / f64::from(size.width()))
            .max(self.fit_imag_span / f64::from(size.height()))
    }
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            fit_real_span: 3.5,
            fit_imag_span: 2.5,
            home_center: ComplexPoint {
                real: -0.75,
                imag: 0.0,
            },
        }
    }
}
