//! Gesture state machine.
//!
//! Raw mouse, touch and wheel events arrive in CSS pixels and are converted to
//! device pixels with the current `CanvasMetrics` before anything else
//! happens. Immediate changes are applied to the `Viewport` handed in by the
//! caller; transitions that should be eased are returned as
//! `InteractionOutcome::AnimateTo` for the caller to hand to the animator.

use std::time::Instant;

use crate::core::data::canvas_size::CanvasMetrics;
use crate::core::data::pixel_point::{CssPoint, DevicePoint};
use crate::core::interaction::gesture::{GestureState, MouseButton, SelectionRect, TapRecord};
use crate::core::interaction::limits::{InteractionLimits, RectZoomMode};
use crate::core::util::coordinate_mapper::pixel_to_complex;
use crate::core::view::viewport::{Viewport, ViewportState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    Unchanged,
    ViewChanged,
    SelectionChanged,
    AnimateTo(ViewportState),
}

#[derive(Debug, Default)]
pub struct InteractionController {
    limits: InteractionLimits,
    state: GestureState,
    last_tap: Option<TapRecord>,
    pinch_ended_at: Option<Instant>,
}

impl InteractionController {
    #[must_use]
    pub fn new(limits: InteractionLimits) -> Self {
        Self {
            limits,
            state: GestureState::Idle,
            last_tap: None,
            pinch_ended_at: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub fn limits(&self) -> &InteractionLimits {
        &self.limits
    }

    #[must_use]
    pub fn selection(&self) -> Option<SelectionRect> {
        match self.state {
            GestureState::RectSelecting {
                anchor_pixel,
                current_pixel,
            } => Some(SelectionRect {
                anchor: anchor_pixel,
                current: current_pixel,
            }),
            _ => None,
        }
    }

    /// Drops any gesture in progress along with the double-tap memory.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.last_tap = None;
        self.pinch_ended_at = None;
    }

    pub fn on_mouse_down(
        &mut self,
        position: CssPoint,
        button: MouseButton,
        metrics: CanvasMetrics,
    ) -> InteractionOutcome {
        let Some(pixel) = device_point(position, metrics) else {
            return InteractionOutcome::Unchanged;
        };

        if !self.state.is_idle() {
            return InteractionOutcome::Unchanged;
        }

        match button {
            MouseButton::Primary => {
                self.state = GestureState::Panning { last_pixel: pixel };
                InteractionOutcome::Unchanged
            }
            MouseButton::Secondary => {
                self.state = GestureState::RectSelecting {
                    anchor_pixel: pixel,
                    current_pixel: pixel,
                };
                InteractionOutcome::SelectionChanged
            }
            MouseButton::Middle => InteractionOutcome::Unchanged,
        }
    }

    pub fn on_mouse_move(
        &mut self,
        position: CssPoint,
        viewport: &mut Viewport,
        metrics: CanvasMetrics,
    ) -> InteractionOutcome {
        let Some(pixel) = device_point(position, metrics) else {
            return InteractionOutcome::Unchanged;
        };

        match self.state {
            GestureState::Panning { last_pixel } => {
                self.state = GestureState::Panning { last_pixel: pixel };
                pan(viewport, last_pixel, pixel)
            }
            GestureState::RectSelecting { anchor_pixel, .. } => {
                self.state = GestureState::RectSelecting {
                    anchor_pixel,
                    current_pixel: pixel,
                };
                InteractionOutcome::SelectionChanged
            }
            _ => InteractionOutcome::Unchanged,
        }
    }

    pub fn on_mouse_up(
        &mut self,
        position: CssPoint,
        viewport: &Viewport,
        metrics: CanvasMetrics,
    ) -> InteractionOutcome {
        match self.state {
            GestureState::Panning { .. } => {
                self.state = GestureState::Idle;
                InteractionOutcome::Unchanged
            }
            GestureState::RectSelecting {
                anchor_pixel,
                current_pixel,
            } => {
                self.state = GestureState::Idle;

                let current = device_point(position, metrics).unwrap_or(current_pixel);
                let rect = SelectionRect {
                    anchor: anchor_pixel,
                    current,
                };

                match self.rect_target(rect, viewport, metrics) {
                    Some(target) => InteractionOutcome::AnimateTo(target),
                    None => InteractionOutcome::SelectionChanged,
                }
            }
            _ => InteractionOutcome::Unchanged,
        }
    }

    pub fn on_wheel(
        &mut self,
        position: CssPoint,
        delta_y: f64,
        viewport: &mut Viewport,
        metrics: CanvasMetrics,
    ) -> InteractionOutcome {
        if !delta_y.is_finite() {
            tracing::debug!(delta_y, "rejected non-finite wheel delta");
            return InteractionOutcome::Unchanged;
        }

        let Some(anchor) = device_point(position, metrics) else {
            return InteractionOutcome::Unchanged;
        };

        let factor = self.limits.wheel_factor(delta_y);

        if viewport.zoom_at(anchor, factor, metrics.size()) {
            InteractionOutcome::ViewChanged
        } else {
            InteractionOutcome::Unchanged
        }
    }

    pub fn on_double_click(
        &mut self,
        position: CssPoint,
        viewport: &Viewport,
        metrics: CanvasMetrics,
    ) -> InteractionOutcome {
        match device_point(position, metrics) {
            Some(anchor) => halve_at(anchor, viewport, metrics),
            None => InteractionOutcome::Unchanged,
        }
    }

    /// `touches` is the full set of active touches after the new one landed.
    pub fn on_touch_start(
        &mut self,
        touches: &[CssPoint],
        viewport: &Viewport,
        metrics: CanvasMetrics,
        now: Instant,
    ) -> InteractionOutcome {
        let Some(pixels) = device_points(touches, metrics) else {
            return InteractionOutcome::Unchanged;
        };

        match pixels.as_slice() {
            [] => InteractionOutcome::Unchanged,
            [pixel] => self.single_touch_start(*pixel, viewport, metrics, now),
            [first, second, ..] => {
                self.start_pinch(*first, *second, viewport);
                InteractionOutcome::Unchanged
            }
        }
    }

    pub fn on_touch_move(
        &mut self,
        touches: &[CssPoint],
        viewport: &mut Viewport,
        metrics: CanvasMetrics,
        now: Instant,
    ) -> InteractionOutcome {
        let Some(pixels) = device_points(touches, metrics) else {
            return InteractionOutcome::Unchanged;
        };

        match (self.state, pixels.as_slice()) {
            (
                GestureState::Pinching {
                    initial_distance,
                    initial_scale,
                    anchor_pixel,
                },
                [first, second, ..],
            ) => {
                let distance = first.distance_to(*second);

                if distance < self.limits.min_pinch_distance {
                    return InteractionOutcome::Unchanged;
                }

                let scale = initial_scale / (distance / initial_distance);

                if viewport.zoom_to_scale_at(anchor_pixel, scale, metrics.size()) {
                    InteractionOutcome::ViewChanged
                } else {
                    InteractionOutcome::Unchanged
                }
            }
            (
                GestureState::SingleTouchTracking {
                    start_pixel,
                    last_pixel,
                },
                [pixel, ..],
            ) => {
                self.state = GestureState::SingleTouchTracking {
                    start_pixel,
                    last_pixel: *pixel,
                };

                if self.within_pinch_grace(now) {
                    return InteractionOutcome::Unchanged;
                }

                pan(viewport, last_pixel, *pixel)
            }
            _ => InteractionOutcome::Unchanged,
        }
    }

    /// `touches` is the set of touches still down after the lift.
    pub fn on_touch_end(
        &mut self,
        touches: &[CssPoint],
        metrics: CanvasMetrics,
        now: Instant,
    ) -> InteractionOutcome {
        let remaining = device_points(touches, metrics).unwrap_or_default();

        match self.state {
            GestureState::Pinching { .. } if remaining.len() < 2 => {
                self.pinch_ended_at = Some(now);
                self.state = match remaining.first() {
                    Some(pixel) => GestureState::SingleTouchTracking {
                        start_pixel: *pixel,
                        last_pixel: *pixel,
                    },
                    None => GestureState::Idle,
                };
            }
            GestureState::SingleTouchTracking { .. } if remaining.is_empty() => {
                self.state = GestureState::Idle;
            }
            _ => {}
        }

        InteractionOutcome::Unchanged
    }

    fn single_touch_start(
        &mut self,
        pixel: DevicePoint,
        viewport: &Viewport,
        metrics: CanvasMetrics,
        now: Instant,
    ) -> InteractionOutcome {
        self.state = GestureState::SingleTouchTracking {
            start_pixel: pixel,
            last_pixel: pixel,
        };

        if self.is_double_tap(pixel, now) {
            self.last_tap = None;
            return halve_at(pixel, viewport, metrics);
        }

        self.last_tap = Some(TapRecord { time: now, pixel });
        InteractionOutcome::Unchanged
    }

    fn is_double_tap(&self, pixel: DevicePoint, now: Instant) -> bool {
        self.last_tap.is_some_and(|tap| {
            now.saturating_duration_since(tap.time) <= self.limits.double_tap_window
                && tap.pixel.distance_to(pixel) <= self.limits.double_tap_distance
        })
    }

    fn start_pinch(&mut self, first: DevicePoint, second: DevicePoint, viewport: &Viewport) {
        self.state = GestureState::Pinching {
            initial_distance: first
                .distance_to(second)
                .max(self.limits.min_pinch_distance),
            initial_scale: viewport.state().scale,
            anchor_pixel: first.midpoint(second),
        };
        self.last_tap = None;
    }

    fn within_pinch_grace(&self, now: Instant) -> bool {
        self.pinch_ended_at
            .is_some_and(|ended| now.saturating_duration_since(ended) < self.limits.pinch_grace)
    }

    fn rect_target(
        &self,
        rect: SelectionRect,
        viewport: &Viewport,
        metrics: CanvasMetrics,
    ) -> Option<ViewportState> {
        let min_size = self.limits.rect_min_size;

        if rect.width() <= min_size || rect.height() <= min_size {
            tracing::debug!(
                width = rect.width(),
                height = rect.height(),
                "selection too small, discarded"
            );
            return None;
        }

        let size = metrics.size();
        let state = viewport.state();
        let center = pixel_to_complex(rect.center(), &state, size);

        let width_ratio = rect.width() / f64::from(size.width());
        let height_ratio = rect.height() / f64::from(size.height());
        let factor = match self.limits.rect_zoom_mode {
            RectZoomMode::Fit => width_ratio.min(height_ratio),
            RectZoomMode::Fill => width_ratio.max(height_ratio),
        };

        Some(ViewportState {
            cx: center.real,
            cy: center.imag,
            scale: viewport.clamp_scale(state.scale * factor),
        })
    }
}

fn device_point(position: CssPoint, metrics: CanvasMetrics) -> Option<DevicePoint> {
    if !position.is_finite() {
        tracing::debug!(?position, "rejected non-finite pointer position");
        return None;
    }

    Some(metrics.to_device(position))
}

fn device_points(touches: &[CssPoint], metrics: CanvasMetrics) -> Option<Vec<DevicePoint>> {
    touches
        .iter()
        .map(|touch| device_point(*touch, metrics))
        .collect()
}

fn pan(viewport: &mut Viewport, from: DevicePoint, to: DevicePoint) -> InteractionOutcome {
    if viewport.pan_by(to.x - from.x, to.y - from.y) {
        InteractionOutcome::ViewChanged
    } else {
        InteractionOutcome::Unchanged
    }
}

fn halve_at(anchor: DevicePoint, viewport: &Viewport, metrics: CanvasMetrics) -> InteractionOutcome {
    let mut target = viewport.clone();

    if target.zoom_at(anchor, 0.5, metrics.size()) {
        InteractionOutcome::AnimateTo(target.state())
    } else {
        InteractionOutcome::Unchanged
    }
}
