use crate::core::data::pixel_point::{CssPoint, DevicePoint};

#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
pub enum CanvasSizeError {
    #[error("canvas size must be positive: {width}x{height}")]
    Empty { width: u32, height: u32 },
    #[error("device pixel ratio must be finite and positive: {0}")]
    InvalidDevicePixelRatio(f64),
}

/// Canvas dimensions in device pixels. Never zero in either direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasSizeError> {
        if width == 0 || height == 0 {
            return Err(CanvasSizeError::Empty { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn center(&self) -> DevicePoint {
        DevicePoint {
            x: f64::from(self.width) / 2.0,
            y: f64::from(self.height) / 2.0,
        }
    }
}

/// The `(width, height, devicePixelRatio)` tuple reported by the host window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasMetrics {
    size: CanvasSize,
    device_pixel_ratio: f64,
}

impl CanvasMetrics {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Result<Self, CanvasSizeError> {
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(CanvasSizeError::InvalidDevicePixelRatio(device_pixel_ratio));
        }

        Ok(Self {
            size: CanvasSize::new(width, height)?,
            device_pixel_ratio,
        })
    }

    #[must_use]
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    #[must_use]
    pub fn to_device(&self, point: CssPoint) -> DevicePoint {
        point.to_device(self.device_pixel_ratio)
    }
}
