//! The explorer session: every piece of mutable view state plus the glue that
//! routes input through the gesture machine, the animator and the render
//! scheduler.
//!
//! The session is single-threaded and clock-agnostic. Every entry point takes
//! `now`, and shells call [`ExplorerSession::tick`] from their frame loop to
//! advance animations and learn whether a render is due.

use std::time::{Duration, Instant};

use crate::controllers::interactive::data::frame_request::FrameRequest;
use crate::controllers::interactive::scheduler::{RenderScheduler, DEFAULT_RENDER_DEBOUNCE};
use crate::core::actions::cancellation::NeverCancel;
use crate::core::actions::evaluator::FrameEvaluator;
use crate::core::actions::render_frame::{render_frame, RenderFrameError, RenderedFrame};
use crate::core::camera::animator::{CameraAnimator, DEFAULT_ANIMATION_DURATION};
use crate::core::data::canvas_size::{CanvasMetrics, CanvasSizeError};
use crate::core::data::frame_params::FrameParams;
use crate::core::data::pixel_point::CssPoint;
use crate::core::fractals::mandelbrot::colour_mapping::factory::colour_map_factory;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::params::IterationBudget;
use crate::core::interaction::controller::{InteractionController, InteractionOutcome};
use crate::core::interaction::gesture::{GestureState, MouseButton, SelectionRect};
use crate::core::interaction::limits::InteractionLimits;
use crate::core::view::limits::ViewLimits;
use crate::core::view::viewport::{Viewport, ViewportState};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Canvas(#[from] CanvasSizeError),
    #[error(transparent)]
    Mandelbrot(#[from] MandelbrotError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub view: ViewLimits,
    pub interaction: InteractionLimits,
    pub animation_duration: Duration,
    pub render_debounce: Duration,
    pub iteration_budget: IterationBudget,
    pub colour_map: ColourMapKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            view: ViewLimits::default(),
            interaction: InteractionLimits::default(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            render_debounce: DEFAULT_RENDER_DEBOUNCE,
            iteration_budget: IterationBudget::default(),
            colour_map: ColourMapKind::default(),
        }
    }
}

/// Raw pointer input in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput<'a> {
    Mouse {
        position: CssPoint,
        button: MouseButton,
    },
    /// Every touch currently on the surface.
    Touch { touches: &'a [CssPoint] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub render_due: bool,
    pub animating: bool,
    pub next_deadline: Option<Instant>,
}

pub struct ExplorerSession {
    config: SessionConfig,
    metrics: CanvasMetrics,
    viewport: Viewport,
    animator: CameraAnimator,
    interaction: InteractionController,
    scheduler: RenderScheduler,
    iteration_budget: IterationBudget,
    colour_map: ColourMapKind,
}

impl ExplorerSession {
    /// Fits the view to the canvas and makes the first frame due at `now`.
    pub fn new(
        config: SessionConfig,
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
        now: Instant,
    ) -> Result<Self, SessionError> {
        let metrics = CanvasMetrics::new(width, height, device_pixel_ratio)?;
        let mut scheduler = RenderScheduler::new(config.render_debounce);
        scheduler.request_frame(now);

        tracing::debug!(width, height, device_pixel_ratio, "session created");

        Ok(Self {
            metrics,
            viewport: Viewport::fit(metrics.size(), &config.view),
            animator: CameraAnimator::new(),
            interaction: InteractionController::new(config.interaction),
            scheduler,
            iteration_budget: config.iteration_budget,
            colour_map: config.colour_map,
            config,
        })
    }

    pub fn on_pointer_down(&mut self, input: PointerInput<'_>, now: Instant) -> InteractionOutcome {
        let outcome = match input {
            PointerInput::Mouse { position, button } => {
                self.interaction.on_mouse_down(position, button, self.metrics)
            }
            PointerInput::Touch { touches } => {
                self.interaction
                    .on_touch_start(touches, &self.viewport, self.metrics, now)
            }
        };

        self.apply(outcome, None, now)
    }

    pub fn on_pointer_move(&mut self, input: PointerInput<'_>, now: Instant) -> InteractionOutcome {
        let mut scratch = self.viewport.clone();

        let outcome = match input {
            PointerInput::Mouse { position, .. } => {
                self.interaction
                    .on_mouse_move(position, &mut scratch, self.metrics)
            }
            PointerInput::Touch { touches } => {
                self.interaction
                    .on_touch_move(touches, &mut scratch, self.metrics, now)
            }
        };

        self.apply(outcome, Some(scratch), now)
    }

    /// For touch input, `touches` holds the touches still down after the lift.
    pub fn on_pointer_up(&mut self, input: PointerInput<'_>, now: Instant) -> InteractionOutcome {
        let outcome = match input {
            PointerInput::Mouse { position, .. } => {
                self.interaction
                    .on_mouse_up(position, &self.viewport, self.metrics)
            }
            PointerInput::Touch { touches } => {
                self.interaction.on_touch_end(touches, self.metrics, now)
            }
        };

        self.apply(outcome, None, now)
    }

    pub fn on_wheel(&mut self, position: CssPoint, delta_y: f64, now: Instant) -> InteractionOutcome {
        let mut scratch = self.viewport.clone();
        let outcome = self
            .interaction
            .on_wheel(position, delta_y, &mut scratch, self.metrics);

        self.apply(outcome, Some(scratch), now)
    }

    pub fn on_double_click(&mut self, position: CssPoint, now: Instant) -> InteractionOutcome {
        let outcome = self
            .interaction
            .on_double_click(position, &self.viewport, self.metrics);

        self.apply(outcome, None, now)
    }

    /// Re-fits the view to a new canvas. Invalid sizes leave the session as it was.
    pub fn on_resize(
        &mut self,
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
        now: Instant,
    ) -> Result<(), SessionError> {
        let metrics = CanvasMetrics::new(width, height, device_pixel_ratio).inspect_err(|err| {
            tracing::warn!(error = %err, "resize rejected");
        })?;

        tracing::debug!(width, height, device_pixel_ratio, "canvas resized");

        self.metrics = metrics;
        self.refit(now);

        Ok(())
    }

    pub fn set_iteration_budget(&mut self, max_iterations: u32, now: Instant) -> Result<(), SessionError> {
        self.iteration_budget = IterationBudget::new(max_iterations)?;
        self.scheduler.request_render(now);

        Ok(())
    }

    pub fn set_colour_map(&mut self, kind: ColourMapKind, now: Instant) {
        self.colour_map = kind;
        self.scheduler.request_render(now);
    }

    pub fn reset_view(&mut self, now: Instant) {
        tracing::debug!("view reset");
        self.refit(now);
    }

    /// Advances any running animation and polls the render deadline.
    pub fn tick(&mut self, now: Instant) -> Tick {
        if let Some(step) = self.animator.step(now) {
            self.viewport.commit(step.state());
            self.scheduler.request_frame(now);
        }

        Tick {
            render_due: self.scheduler.poll(now),
            animating: self.animator.is_animating(),
            next_deadline: self.scheduler.pending_deadline(),
        }
    }

    #[must_use]
    pub fn frame_params(&self) -> FrameParams {
        FrameParams {
            view: self.viewport.state(),
            size: self.metrics.size(),
            max_iterations: self.iteration_budget.get(),
        }
    }

    #[must_use]
    pub fn frame_request(&self) -> FrameRequest {
        FrameRequest {
            params: self.frame_params(),
            colour_map: self.colour_map,
        }
    }

    /// Renders the current view synchronously on the calling thread.
    pub fn get_frame(&self, evaluator: &dyn FrameEvaluator) -> Result<RenderedFrame, RenderFrameError> {
        let params = self.frame_params();
        let colour_map = colour_map_factory(self.colour_map, params.max_iterations);

        render_frame(params, colour_map.as_ref(), evaluator, &NeverCancel)
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn metrics(&self) -> CanvasMetrics {
        self.metrics
    }

    #[must_use]
    pub fn selection(&self) -> Option<SelectionRect> {
        self.interaction.selection()
    }

    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        self.interaction.state()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    #[must_use]
    pub fn iteration_budget(&self) -> IterationBudget {
        self.iteration_budget
    }

    #[must_use]
    pub fn colour_map(&self) -> ColourMapKind {
        self.colour_map
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn refit(&mut self, now: Instant) {
        self.animator.cancel();
        self.interaction.reset();
        self.viewport.reset_to_fit(self.metrics.size(), &self.config.view);
        self.scheduler.request_render(now);
    }

    fn apply(
        &mut self,
        outcome: InteractionOutcome,
        scratch: Option<Viewport>,
        now: Instant,
    ) -> InteractionOutcome {
        match outcome {
            InteractionOutcome::ViewChanged => {
                if self.animator.is_animating() {
                    tracing::trace!("view change dropped during animation");
                    return InteractionOutcome::Unchanged;
                }

                if let Some(scratch) = scratch {
                    self.viewport = scratch;
                    self.scheduler.request_render(now);
                }

                outcome
            }
            InteractionOutcome::AnimateTo(target) => {
                let started = self.animator.start(
                    self.viewport.state(),
                    target,
                    now,
                    self.config.animation_duration,
                );

                if !started {
                    return InteractionOutcome::Unchanged;
                }

                self.scheduler.request_frame(now);
                outcome
            }
            InteractionOutcome::Unchanged | InteractionOutcome::SelectionChanged => outcome,
        }
    }
}
