use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes frames as binary PPM (P6).
#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(filepath)?);
        let size = buffer.size();

        // P6: binary RGB, then width, height and max colour value
        write!(file, "P6\n{} {}\n255\n", size.width(), size.height())?;
        file.write_all(buffer.buffer())?;
        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::canvas_size::CanvasSize;
    use crate::core::data::colour::Colour;

    #[test]
    fn test_writes_header_and_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.ppm");
        let mut buffer = PixelBuffer::new(CanvasSize::new(2, 1).unwrap());
        buffer.set_pixel(1, 0, Colour { r: 1, g: 2, b: 3 }).unwrap();

        PpmFilePresenter::new().present(&buffer, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let header = b"P6\n2 1\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(&bytes[header.len()..], &[0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.ppm");
        let buffer = PixelBuffer::new(CanvasSize::new(1, 1).unwrap());

        assert!(PpmFilePresenter::new().present(&buffer, &path).is_err());
    }
}
