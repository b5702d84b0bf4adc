use std::time::Instant;

use crate::core::data::pixel_point::DevicePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

/// Active gesture. Every point is in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Panning {
        last_pixel: DevicePoint,
    },
    RectSelecting {
        anchor_pixel: DevicePoint,
        current_pixel: DevicePoint,
    },
    Pinching {
        initial_distance: f64,
        initial_scale: f64,
        anchor_pixel: DevicePoint,
    },
    SingleTouchTracking {
        start_pixel: DevicePoint,
        last_pixel: DevicePoint,
    },
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapRecord {
    pub time: Instant,
    pub pixel: DevicePoint,
}

/// The rectangle currently being dragged out, corner to corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub anchor: DevicePoint,
    pub current: DevicePoint,
}

impl SelectionRect {
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.current.x - self.anchor.x).abs()
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        (self.current.y - self.anchor.y).abs()
    }

    #[must_use]
    pub fn center(&self) -> DevicePoint {
        self.anchor.midpoint(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_rect_is_orientation_independent() {
        let rect = SelectionRect {
            anchor: DevicePoint::new(50.0, 10.0),
            current: DevicePoint::new(20.0, 40.0),
        };

        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 30.0);
        assert_eq!(rect.center(), DevicePoint::new(35.0, 25.0));
    }

    #[test]
    fn default_gesture_is_idle() {
        assert!(GestureState::default().is_idle());
    }
}
