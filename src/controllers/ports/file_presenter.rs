use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Persists a finished frame. Implementations own the on-disk format; the
/// caller owns the directory layout.
pub trait FilePresenterPort {
    fn present(&self, frame: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()>;
}
