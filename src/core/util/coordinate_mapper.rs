//! Pixel to complex-plane mapping.
//!
//! Both directions work in device pixels. Screen Y grows downward while the
//! imaginary axis grows upward, so the vertical term is flipped.

use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::complex_point::ComplexPoint;
use crate::core::data::pixel_point::DevicePoint;
use crate::core::view::viewport::ViewportState;

#[must_use]
pub fn pixel_to_complex(pixel: DevicePoint, view: &ViewportState, size: CanvasSize) -> ComplexPoint {
    let center = size.center();

    ComplexPoint {
        real: view.cx + (pixel.x - center.x) * view.scale,
        imag: view.cy - (pixel.y - center.y) * view.scale,
    }
}

#[must_use]
pub fn complex_to_pixel(point: ComplexPoint, view: &ViewportState, size: CanvasSize) -> DevicePoint {
    let center = size.center();

    DevicePoint {
        x: (point.real - view.cx) / view.scale + center.x,
        y: center.y - (point.imag - view.cy) / view.scale,
    }
}
