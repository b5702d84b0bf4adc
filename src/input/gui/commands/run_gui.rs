use std::marker::PhantomData;
use std::time::Instant;

use winit::dpi::LogicalSize;
use winit::event::Event;
use winit::event_loop::EventLoopBuilder;
use winit::window::{Window, WindowBuilder};

use crate::controllers::interactive::session::SessionConfig;
use crate::controllers::interactive::InteractiveController;
use crate::core::actions::evaluator::{select_evaluator, EvaluatorPreference};
use crate::input::gui::app::gui_app::{GuiApp, LoopDirective};
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::commands::ports::presenter_factory::GuiPresenterFactoryPort;
use crate::input::gui::errors::GuiError;
use crate::input::gui::events::GuiEvent;

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    config: SessionConfig,
    evaluator: EvaluatorPreference,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F) -> Self {
        Self {
            presenter_factory,
            config: SessionConfig::default(),
            evaluator: EvaluatorPreference::default(),
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_evaluator(mut self, evaluator: EvaluatorPreference) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Opens the explorer window and blocks until it is closed.
    pub fn execute(&self) -> Result<(), GuiError> {
        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
        let event_loop_proxy = event_loop.create_proxy();

        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title("Mandelbrot Explorer")
                .with_inner_size(LogicalSize::new(800.0, 600.0))
                .with_min_inner_size(LogicalSize::new(200.0, 200.0))
                .build(&event_loop)?,
        ));

        let presenter = self.presenter_factory.build(window, event_loop_proxy)?;
        let controller = InteractiveController::new(presenter.share_adapter(), select_evaluator(self.evaluator));
        let mut app = GuiApp::new(window, &event_loop, presenter, controller, self.config, Instant::now())?;
        let mut failure = None;

        tracing::info!("explorer window open");

        event_loop.run(|event, elwt| {
            let now = Instant::now();

            match event {
                Event::UserEvent(GuiEvent::Wake) => app.wake(),
                Event::WindowEvent { ref event, window_id } if window_id == window.id() => {
                    match app.handle_window_event(event, now) {
                        Ok(LoopDirective::Continue) => {}
                        Ok(LoopDirective::Exit) => {
                            app.shutdown();
                            elwt.exit();
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "explorer window failed");
                            failure = Some(err);
                            app.shutdown();
                            elwt.exit();
                        }
                    }
                }
                Event::AboutToWait => elwt.set_control_flow(app.about_to_wait(now)),
                _ => {}
            }
        })?;

        tracing::info!("explorer window closed");

        failure.map_or(Ok(()), Err)
    }
}
