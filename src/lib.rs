pub mod adapters;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod presenters;

pub use controllers::cli::render_image::{RenderImageController, RenderImageError, RenderImageSettings};
pub use controllers::interactive::{ExplorerSession, InteractiveController, PointerInput, SessionConfig, SessionError};
pub use core::actions::evaluator::{select_evaluator, EvaluatorPreference};
pub use core::data::complex_point::ComplexPoint;
pub use core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
pub use presenters::file::ppm::PpmFilePresenter;

#[cfg(feature = "gui")]
pub use input::gui::{GuiError, RunGuiCommand};
#[cfg(feature = "gui")]
pub use presenters::pixels::PixelsPresenterFactory;
