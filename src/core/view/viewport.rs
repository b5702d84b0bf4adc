use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::pixel_point::DevicePoint;
use crate::core::util::coordinate_mapper::pixel_to_complex;
use crate::core::view::limits::ViewLimits;

/// Centre of the view on the complex plane plus plane units per device pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub cx: f64,
    pub cy: f64,
    pub scale: f64,
}

impl ViewportState {
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.scale.is_finite()
    }
}

/// A `ViewportState` together with the scale bounds it must stay within.
///
/// `min_scale` is fixed at construction. `max_scale` tracks the fit-all scale
/// of the most recent reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    state: ViewportState,
    min_scale: f64,
    max_scale: f64,
}

impl Viewport {
    #[must_use]
    pub fn fit(size: CanvasSize, limits: &ViewLimits) -> Self {
        let mut viewport = Self {
            state: ViewportState {
                cx: limits.home_center.real,
                cy: limits.home_center.imag,
                scale: limits.min_scale,
            },
            min_scale: limits.min_scale,
            max_scale: limits.min_scale,
        };

        viewport.reset_to_fit(size, limits);
        viewport
    }

    pub fn reset_to_fit(&mut self, size: CanvasSize, limits: &ViewLimits) {
        let scale = limits.fit_scale(size).max(self.min_scale);

        self.max_scale = scale;
        self.state = ViewportState {
            cx: limits.home_center.real,
            cy: limits.home_center.imag,
            scale,
        };
    }

    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.min(self.max_scale).max(self.min_scale)
    }

    /// Replaces the state wholesale, clamping its scale. Non-finite states are
    /// refused and leave the viewport untouched.
    pub fn commit(&mut self, state: ViewportState) -> bool {
        if !state.is_finite() {
            return false;
        }

        self.state = ViewportState {
            scale: self.clamp_scale(state.scale),
            ..state
        };

        true
    }

    /// Drags the plane by a device-pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }

        let scale = self.state.scale;

        self.commit(ViewportState {
            cx: self.state.cx - dx * scale,
            cy: self.state.cy + dy * scale,
            scale,
        })
    }

    pub fn zoom_at(&mut self, anchor: DevicePoint, factor: f64, size: CanvasSize) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }

        self.zoom_to_scale_at(anchor, self.state.scale * factor, size)
    }

    /// Sets the scale while keeping `anchor` over the same plane coordinate.
    pub fn zoom_to_scale_at(&mut self, anchor: DevicePoint, scale: f64, size: CanvasSize) -> bool {
        if !anchor.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return false;
        }

        let before = pixel_to_complex(anchor, &self.state, size);
        let zoomed = ViewportState {
            scale: self.clamp_scale(scale),
            ..self.state
        };
        let after = pixel_to_complex(anchor, &zoomed, size);

        self.commit(ViewportState {
            cx: zoomed.cx + before.real - after.real,
            cy: zoomed.cy + before.imag - after.imag,
            scale: zoomed.scale,
        })
    }
}
