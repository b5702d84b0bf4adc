//! Screen positions.
//!
//! Raw input events arrive in CSS (logical) pixels while every computation on
//! the canvas happens in device pixels. The two are separate types so that a
//! missing device-pixel-ratio conversion is a type error rather than a zoom
//! that lands in the wrong place on high density displays.

/// A position in CSS pixels, as delivered by pointer, touch and wheel events.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CssPoint {
    pub x: f64,
    pub y: f64,
}

impl CssPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Converts to device pixels using the current device pixel ratio.
    #[must_use]
    pub fn to_device(self, device_pixel_ratio: f64) -> DevicePoint {
        DevicePoint {
            x: self.x * device_pixel_ratio,
            y: self.y * device_pixel_ratio,
        }
    }
}

/// A position in device (physical) pixels on the canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn distance_to(&self, other: DevicePoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn midpoint(&self, other: DevicePoint) -> DevicePoint {
        DevicePoint {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}
