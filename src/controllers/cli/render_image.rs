use std::path::Path;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::cancellation::NeverCancel;
use crate::core::actions::evaluator::{select_evaluator, EvaluatorPreference};
use crate::core::actions::render_frame::{render_frame, RenderFrameError, RenderedFrame};
use crate::core::data::canvas_size::{CanvasSize, CanvasSizeError};
use crate::core::data::complex_point::ComplexPoint;
use crate::core::data::frame_params::FrameParams;
use crate::core::fractals::mandelbrot::colour_mapping::factory::colour_map_factory;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::params::IterationBudget;
use crate::core::view::limits::ViewLimits;
use crate::core::view::viewport::{Viewport, ViewportState};

#[derive(Debug, thiserror::Error)]
pub enum RenderImageError {
    #[error(transparent)]
    Canvas(#[from] CanvasSizeError),
    #[error(transparent)]
    Mandelbrot(#[from] MandelbrotError),
    #[error("zoom must be finite and positive: {0}")]
    InvalidZoom(f64),
    #[error("centre must be finite: {real} + {imag}i")]
    InvalidCentre { real: f64, imag: f64 },
    #[error(transparent)]
    Render(#[from] RenderFrameError),
    #[error("nothing rendered yet")]
    NothingRendered,
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderImageSettings {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub center: ComplexPoint,
    /// Magnification relative to the fit-all view.
    pub zoom: f64,
    pub colour_map: ColourMapKind,
    pub evaluator: EvaluatorPreference,
}

impl Default for RenderImageSettings {
    fn default() -> Self {
        let limits = ViewLimits::default();

        Self {
            width: 800,
            height: 600,
            max_iterations: IterationBudget::default().get(),
            center: limits.home_center,
            zoom: 1.0,
            colour_map: ColourMapKind::default(),
            evaluator: EvaluatorPreference::default(),
        }
    }
}

impl RenderImageSettings {
    /// The viewport these settings describe, with the scale clamped to the
    /// usual bounds for the canvas.
    pub fn viewport_state(&self, size: CanvasSize, limits: &ViewLimits) -> Result<ViewportState, RenderImageError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(RenderImageError::InvalidZoom(self.zoom));
        }

        let mut viewport = Viewport::fit(size, limits);
        let requested = ViewportState {
            cx: self.center.real,
            cy: self.center.imag,
            scale: viewport.state().scale / self.zoom,
        };

        if !viewport.commit(requested) {
            return Err(RenderImageError::InvalidCentre {
                real: self.center.real,
                imag: self.center.imag,
            });
        }

        Ok(viewport.state())
    }
}

/// Renders a single image synchronously and hands it to a file presenter.
pub struct RenderImageController<P: FilePresenterPort> {
    presenter: P,
    frame: Option<RenderedFrame>,
}

impl<P: FilePresenterPort> RenderImageController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            frame: None,
        }
    }

    pub fn generate(&mut self, settings: &RenderImageSettings) -> Result<&RenderedFrame, RenderImageError> {
        let size = CanvasSize::new(settings.width, settings.height)?;
        let budget = IterationBudget::new(settings.max_iterations)?;
        let view = settings.viewport_state(size, &ViewLimits::default())?;

        tracing::info!(
            width = settings.width,
            height = settings.height,
            max_iterations = budget.get(),
            cx = view.cx,
            cy = view.cy,
            scale = view.scale,
            colour_map = %settings.colour_map,
            "rendering mandelbrot set"
        );

        let params = FrameParams {
            view,
            size,
            max_iterations: budget.get(),
        };
        let evaluator = select_evaluator(settings.evaluator);
        let colour_map = colour_map_factory(settings.colour_map, budget.get());

        let frame = render_frame(params, colour_map.as_ref(), evaluator.as_ref(), &NeverCancel)?;

        tracing::info!(
            elapsed_ms = frame.render_duration.as_millis() as u64,
            evaluator = %frame.evaluator,
            "render finished"
        );

        Ok(self.frame.insert(frame))
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), RenderImageError> {
        let frame = self.frame.as_ref().ok_or(RenderImageError::NothingRendered)?;

        self.presenter.present(&frame.pixel_buffer, filepath)?;

        Ok(())
    }
}
