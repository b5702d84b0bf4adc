use crate::core::data::frame_params::FrameParams;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;

/// Snapshot of everything one render job needs. `PartialEq` lets shells skip
/// resubmitting an unchanged frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameRequest {
    pub params: FrameParams,
    pub colour_map: ColourMapKind,
}
