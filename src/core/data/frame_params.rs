use crate::core::data::canvas_size::CanvasSize;
use crate::core::view::viewport::ViewportState;

/// Everything one evaluation pass reads, snapshotted once per frame.
///
/// This is also the uniform set a GPU backend would upload: centre, scale,
/// iteration cap and resolution.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameParams {
    pub view: ViewportState,
    pub size: CanvasSize,
    pub max_iterations: u32,
}
