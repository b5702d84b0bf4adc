use crate::core::data::canvas_size::CanvasSize;

/// A per-pixel computation over a whole canvas.
pub trait FractalAlgorithm: Sync {
    type Output: Send;

    fn size(&self) -> CanvasSize;

    fn compute(&self, x: u32, y: u32) -> Self::Output;
}
