use std::time::Instant;

use egui::Context;
use egui_winit::State as EguiWinitState;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::Window;

use crate::controllers::interactive::data::frame_request::FrameRequest;
use crate::controllers::interactive::session::{ExplorerSession, PointerInput, SessionConfig};
use crate::controllers::interactive::InteractiveController;
use crate::core::data::pixel_point::CssPoint;
use crate::core::interaction::controller::InteractionOutcome;
use crate::core::interaction::gesture::MouseButton;
use crate::input::gui::app::panel::{paint_selection, show_panel, PanelActions, PanelReadout};
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::errors::GuiError;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::pointer::{ClickTracker, TouchTracker, DOUBLE_CLICK_DISTANCE};

/// CSS pixels scrolled per wheel notch.
const LINE_DELTA_PIXELS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopDirective {
    Continue,
    Exit,
}

/// Owns the explorer session and connects it to the window, the render
/// worker and the presenter.
pub struct GuiApp<P: GuiPresenterPort> {
    window: &'static Window,
    presenter: P,
    controller: InteractiveController,
    session: ExplorerSession,
    egui_ctx: Context,
    egui_state: EguiWinitState,
    scale_factor: f64,
    cursor: Option<CssPoint>,
    held_button: Option<MouseButton>,
    clicks: ClickTracker,
    touches: TouchTracker,
    last_submitted: Option<FrameRequest>,
    submitted_generation: u64,
    redraw_pending: bool,
}

impl<P: GuiPresenterPort> GuiApp<P> {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<GuiEvent>,
        presenter: P,
        controller: InteractiveController,
        config: SessionConfig,
        now: Instant,
    ) -> Result<Self, GuiError> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let session = ExplorerSession::new(config, size.width, size.height, scale_factor, now)?;

        let egui_ctx = Context::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(scale_factor as f32),
            None,
        );

        Ok(Self {
            window,
            presenter,
            controller,
            session,
            egui_ctx,
            egui_state,
            scale_factor,
            cursor: None,
            held_button: None,
            clicks: ClickTracker::new(config.interaction.double_tap_window, DOUBLE_CLICK_DISTANCE),
            touches: TouchTracker::new(),
            last_submitted: None,
            submitted_generation: 0,
            redraw_pending: true,
        })
    }

    /// Called when the render worker has posted a new event.
    pub fn wake(&mut self) {
        if self.presenter.drain_render_events() {
            self.redraw_pending = true;
        }
    }

    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, now: Instant) -> Result<LoopDirective, GuiError> {
        let response = self.egui_state.on_window_event(self.window, event);
        if response.repaint {
            self.redraw_pending = true;
        }
        let consumed = response.consumed;

        match event {
            WindowEvent::CloseRequested => return Ok(LoopDirective::Exit),
            WindowEvent::RedrawRequested => self.redraw(now)?,
            WindowEvent::Resized(size) => self.resize(size.width, size.height, now)?,
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                self.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                let size = self.window.inner_size();
                self.resize(size.width, size.height, now)?;
            }
            WindowEvent::CursorMoved { position, .. } => self.on_cursor_moved(*position, now),
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_input(*state, *button, consumed, now);
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => self.on_wheel(*delta, now),
            WindowEvent::Touch(touch) => self.on_touch(touch, consumed, now),
            _ => {}
        }

        Ok(LoopDirective::Continue)
    }

    /// Advances the session clock, submits a render when one is due and
    /// picks how long the event loop may sleep.
    pub fn about_to_wait(&mut self, now: Instant) -> ControlFlow {
        let tick = self.session.tick(now);

        if tick.render_due {
            self.submit_if_changed();
        }
        if tick.render_due || tick.animating {
            self.redraw_pending = true;
        }
        if self.redraw_pending {
            self.window.request_redraw();
        }

        if tick.animating {
            ControlFlow::Poll
        } else if let Some(deadline) = tick.next_deadline {
            ControlFlow::WaitUntil(deadline)
        } else {
            ControlFlow::Wait
        }
    }

    fn redraw(&mut self, now: Instant) -> Result<(), GuiError> {
        self.redraw_pending = false;
        self.presenter.drain_render_events();

        let raw_input = self.egui_state.take_egui_input(self.window);
        let metrics = self.session.metrics();
        let view = self.session.viewport_state();
        let fit_scale = self.session.config().view.fit_scale(metrics.size());
        let readout = PanelReadout {
            view,
            zoom: fit_scale / view.scale,
            width: metrics.size().width(),
            height: metrics.size().height(),
            animating: self.session.is_animating(),
            submitted_generation: self.submitted_generation,
            status: self.presenter.status(),
        };
        let iterations = self.session.iteration_budget().get();
        let colour_map = self.session.colour_map();
        let selection = self.session.selection();

        let mut actions = PanelActions::default();
        let mut output = self.egui_ctx.run(raw_input, |ctx| {
            actions = show_panel(ctx, iterations, colour_map, &readout);
            paint_selection(ctx, selection);
        });

        self.egui_state
            .handle_platform_output(self.window, std::mem::take(&mut output.platform_output));

        if output
            .viewport_output
            .values()
            .any(|viewport| viewport.repaint_delay.is_zero())
        {
            self.redraw_pending = true;
        }

        self.apply_panel_actions(actions, now)?;
        self.presenter.render(output, &self.egui_ctx)
    }

    fn apply_panel_actions(&mut self, actions: PanelActions, now: Instant) -> Result<(), GuiError> {
        if let Some(iterations) = actions.iterations {
            self.session.set_iteration_budget(iterations, now)?;
        }
        if let Some(kind) = actions.colour_map {
            self.session.set_colour_map(kind, now);
        }
        if actions.reset_view {
            self.session.reset_view(now);
            self.release_pointers();
        }

        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32, now: Instant) -> Result<(), GuiError> {
        self.presenter.resize(width, height)?;

        // Minimised windows report a zero size; keep the old view until restored.
        if width > 0 && height > 0 {
            self.session.on_resize(width, height, self.scale_factor, now)?;
            self.release_pointers();
        }

        self.redraw_pending = true;

        Ok(())
    }

    fn submit_if_changed(&mut self) {
        let request = self.session.frame_request();

        if self.last_submitted.as_ref() == Some(&request) {
            return;
        }

        self.submitted_generation = self.controller.submit_request(request);
        self.last_submitted = Some(request);
    }

    fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>, now: Instant) {
        let position = self.to_css(position);
        self.cursor = Some(position);

        if let Some(button) = self.held_button {
            let outcome = self
                .session
                .on_pointer_move(PointerInput::Mouse { position, button }, now);
            self.note(outcome);
        }
    }

    fn on_mouse_input(&mut self, state: ElementState, button: WinitMouseButton, consumed: bool, now: Instant) {
        let (Some(button), Some(position)) = (map_button(button), self.cursor) else {
            return;
        };

        let outcome = match state {
            ElementState::Pressed => {
                if consumed || self.held_button.is_some() {
                    return;
                }

                if button == MouseButton::Primary && self.clicks.register(now, position) {
                    self.session.on_double_click(position, now)
                } else {
                    self.held_button = Some(button);
                    self.session
                        .on_pointer_down(PointerInput::Mouse { position, button }, now)
                }
            }
            ElementState::Released => {
                if self.held_button != Some(button) {
                    return;
                }

                self.held_button = None;
                self.session
                    .on_pointer_up(PointerInput::Mouse { position, button }, now)
            }
        };

        self.note(outcome);
    }

    fn on_wheel(&mut self, delta: MouseScrollDelta, now: Instant) {
        // Positive deltas zoom out, matching a downward scroll.
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * LINE_DELTA_PIXELS,
            MouseScrollDelta::PixelDelta(position) => -position.y / self.scale_factor,
        };
        let position = self.cursor.unwrap_or_else(|| self.canvas_centre());

        let outcome = self.session.on_wheel(position, delta_y, now);
        self.note(outcome);
    }

    fn on_touch(&mut self, touch: &Touch, consumed: bool, now: Instant) {
        let position = self.to_css(touch.location);

        let outcome = match touch.phase {
            TouchPhase::Started => {
                if consumed {
                    return;
                }
                self.touches.start(touch.id, position);
                let touches = self.touches.points();
                self.session
                    .on_pointer_down(PointerInput::Touch { touches: &touches }, now)
            }
            TouchPhase::Moved => {
                if !self.touches.moved(touch.id, position) {
                    return;
                }
                let touches = self.touches.points();
                self.session
                    .on_pointer_move(PointerInput::Touch { touches: &touches }, now)
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if !self.touches.end(touch.id) {
                    return;
                }
                let remaining = self.touches.points();
                self.session
                    .on_pointer_up(PointerInput::Touch { touches: &remaining }, now)
            }
        };

        self.note(outcome);
    }

    fn note(&mut self, outcome: InteractionOutcome) {
        if outcome != InteractionOutcome::Unchanged {
            self.redraw_pending = true;
        }
    }

    fn release_pointers(&mut self) {
        self.held_button = None;
        self.touches.clear();
        self.clicks.reset();
    }

    fn to_css(&self, position: PhysicalPosition<f64>) -> CssPoint {
        CssPoint::new(position.x / self.scale_factor, position.y / self.scale_factor)
    }

    fn canvas_centre(&self) -> CssPoint {
        let size = self.session.metrics().size();

        CssPoint::new(
            f64::from(size.width()) / (2.0 * self.scale_factor),
            f64::from(size.height()) / (2.0 * self.scale_factor),
        )
    }
}

fn map_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Primary),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Secondary),
        _ => None,
    }
}
