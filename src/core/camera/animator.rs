use std::time::{Duration, Instant};

use crate::core::camera::easing::{ease_in_out_quad, lerp};
use crate::core::view::viewport::ViewportState;

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub from: ViewportState,
    pub to: ViewportState,
    pub start_time: Instant,
    pub duration: Duration,
}

impl AnimationRequest {
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }

        let elapsed = now.saturating_duration_since(self.start_time);

        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn state_at(&self, t: f64) -> ViewportState {
        let eased = ease_in_out_quad(t);

        ViewportState {
            cx: lerp(self.from.cx, self.to.cx, eased),
            cy: lerp(self.from.cy, self.to.cy, eased),
            scale: lerp(self.from.scale, self.to.scale, eased),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStep {
    Frame(ViewportState),
    Finished(ViewportState),
}

impl AnimationStep {
    #[must_use]
    pub fn state(&self) -> ViewportState {
        match self {
            Self::Frame(state) | Self::Finished(state) => *state,
        }
    }
}

/// Runs at most one camera transition at a time.
#[derive(Debug, Default)]
pub struct CameraAnimator {
    active: Option<AnimationRequest>,
}

impl CameraAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, leaving the running animation alone, if one is in flight.
    pub fn start(
        &mut self,
        from: ViewportState,
        to: ViewportState,
        now: Instant,
        duration: Duration,
    ) -> bool {
        if self.active.is_some() {
            tracing::debug!("animation request rejected, one already in flight");
            return false;
        }

        self.active = Some(AnimationRequest {
            from,
            to,
            start_time: now,
            duration,
        });

        true
    }

    /// The caller commits the returned state and requests a frame.
    pub fn step(&mut self, now: Instant) -> Option<AnimationStep> {
        let request = self.active?;
        let t = request.progress(now);

        if t >= 1.0 {
            self.active = None;
            return Some(AnimationStep::Finished(request.to));
        }

        Some(AnimationStep::Frame(request.state_at(t)))
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn active(&self) -> Option<&AnimationRequest> {
        self.active.as_ref()
    }
}
