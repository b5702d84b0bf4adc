use std::f64::consts::LN_2;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::frame_params::FrameParams;
use crate::core::data::pixel_point::DevicePoint;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::util::coordinate_mapper::pixel_to_complex;

const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Smooth escape-time count for `c = cx + i*cy`.
///
/// Points that never leave the radius-2 disk return `max_iterations` exactly.
#[must_use]
pub fn escape_iterations(cx: f64, cy: f64, max_iterations: u32) -> f64 {
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut xx = 0.0_f64;
    let mut yy = 0.0_f64;
    let mut iteration = 0_u32;

    while xx + yy <= ESCAPE_RADIUS_SQUARED && iteration < max_iterations {
        y = 2.0 * x * y + cy;
        x = xx - yy + cx;
        xx = x * x;
        yy = y * y;
        iteration += 1;
    }

    if iteration == max_iterations {
        return f64::from(max_iterations);
    }

    let nu = ((xx + yy).ln() / 2.0 / LN_2).ln() / LN_2;
    let nu = if nu.is_nan() { 0.0 } else { nu };

    f64::from(iteration) + 1.0 - nu
}

/// Escape-time evaluation for every pixel of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    params: FrameParams,
}

impl MandelbrotAlgorithm {
    pub fn new(params: FrameParams) -> Result<Self, MandelbrotError> {
        if params.max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterations);
        }

        Ok(Self { params })
    }

    #[must_use]
    pub fn params(&self) -> &FrameParams {
        &self.params
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Output = f64;

    fn size(&self) -> CanvasSize {
        self.params.size
    }

    fn compute(&self, x: u32, y: u32) -> Self::Output {
        let pixel = DevicePoint::new(f64::from(x), f64::from(y));
        let c = pixel_to_complex(pixel, &self.params.view, self.params.size);

        escape_iterations(c.real, c.imag, self.params.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::viewport::ViewportState;

    fn params(max_iterations: u32) -> FrameParams {
        FrameParams {
            view: ViewportState {
                cx: -0.75,
                cy: 0.0,
                scale: 3.5 / 8.0,
            },
            size: CanvasSize::new(8, 6).unwrap(),
            max_iterations,
        }
    }

    #[test]
    fn test_origin_never_escapes() {
        for max_iterations in [1, 2, 10, 256, 1000] {
            assert_eq!(escape_iterations(0.0, 0.0, max_iterations), f64::from(max_iterations));
        }
    }

    #[test]
    fn test_far_point_escapes_quickly() {
        for max_iterations in [5, 50, 500] {
            assert!(escape_iterations(2.0, 2.0, max_iterations) < 5.0);
        }
    }

    #[test]
    fn test_escape_count_is_finite_outside_set() {
        let count = escape_iterations(0.5, 0.5, 256);

        assert!(count.is_finite());
        assert!(count < 256.0);
    }

    #[test]
    fn test_smooth_count_is_continuous_near_boundary() {
        let a = escape_iterations(0.3, 0.5, 1000);
        let b = escape_iterations(0.300_001, 0.5, 1000);

        assert!((a - b).abs() < 0.1, "{a} vs {b}");
    }

    #[test]
    fn test_nan_smoothing_term_becomes_zero() {
        // NaN escapes on the first step, leaving ln(ln(NaN)) as the smoothing term.
        let count = escape_iterations(f64::NAN, 0.0, 10);

        assert!(count.is_finite());
        assert_eq!(count, 2.0);
    }

    #[test]
    fn test_overflowing_orbit_yields_negative_infinity() {
        // |z|^2 overflows to infinity on the first step.
        assert_eq!(escape_iterations(1e200, 0.0, 10), f64::NEG_INFINITY);
    }

    #[test]
    fn test_new_rejects_zero_iterations() {
        assert_eq!(
            MandelbrotAlgorithm::new(params(0)),
            Err(MandelbrotError::ZeroMaxIterations)
        );
    }

    #[test]
    fn test_compute_maps_pixel_through_viewport() {
        let algorithm = MandelbrotAlgorithm::new(params(64)).unwrap();

        // pixel (4, 3) is the canvas centre, which sits on -0.75 + 0i.
        assert_eq!(algorithm.compute(4, 3), 64.0);
        assert_eq!(algorithm.compute(0, 0), escape_iterations(-0.75 - 1.75, 3.0 * 3.5 / 8.0, 64));
        assert_eq!(algorithm.size(), CanvasSize::new(8, 6).unwrap());
    }
}
