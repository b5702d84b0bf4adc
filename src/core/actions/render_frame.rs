use std::time::{Duration, Instant};

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::evaluator::{EvaluatorKind, FrameEvaluator};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    generate_pixel_buffer, GeneratePixelBufferError,
};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::frame_params::FrameParams;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;

#[derive(Debug, thiserror::Error)]
pub enum RenderFrameError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error(transparent)]
    Mandelbrot(#[from] MandelbrotError),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

impl From<GeneratePixelBufferError> for RenderFrameError {
    fn from(err: GeneratePixelBufferError) -> Self {
        match err {
            GeneratePixelBufferError::Cancelled(cancelled) => Self::Cancelled(cancelled),
            GeneratePixelBufferError::PixelBuffer(err) => Self::PixelBuffer(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub pixel_buffer: PixelBuffer,
    pub render_duration: Duration,
    pub evaluator: EvaluatorKind,
}

/// Evaluates and colours one frame from a parameter snapshot.
pub fn render_frame<CMap>(
    params: FrameParams,
    colour_map: &CMap,
    evaluator: &dyn FrameEvaluator,
    cancel: &dyn CancelToken,
) -> Result<RenderedFrame, RenderFrameError>
where
    CMap: ColourMap + ?Sized,
{
    let started = Instant::now();
    let algorithm = MandelbrotAlgorithm::new(params)?;

    let counts = evaluator.escape_counts(&algorithm, cancel)?;
    let pixel_buffer = generate_pixel_buffer(&counts, colour_map, params.size, cancel)?;

    Ok(RenderedFrame {
        pixel_buffer,
        render_duration: started.elapsed(),
        evaluator: evaluator.kind(),
    })
}
