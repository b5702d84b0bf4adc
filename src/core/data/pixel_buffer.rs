use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::colour::Colour;

const BYTES_PER_PIXEL: usize = 3;

fn canvas_size_to_buffer_size(size: CanvasSize) -> usize {
    size.pixel_count() * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelBufferError {
    #[error("pixel at x:{x}, y:{y} outside of {width}x{height} canvas")]
    PixelOutsideBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("canvas size {expected} does not match buffer size {actual}")]
    BoundsMismatch { expected: usize, actual: usize },
}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGB pixels covering a whole canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    size: CanvasSize,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            buffer: vec![0; canvas_size_to_buffer_size(size)],
        }
    }

    pub fn from_data(size: CanvasSize, buffer: PixelBufferData) -> Result<Self, PixelBufferError> {
        let expected = canvas_size_to_buffer_size(size);

        if expected != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected,
                actual: buffer.len(),
            });
        }

        Ok(Self { size, buffer })
    }

    #[must_use]
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(x, y)?;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(x, y)?;

        Ok(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize, PixelBufferError> {
        if x >= self.size.width() || y >= self.size.height() {
            return Err(PixelBufferError::PixelOutsideBounds {
                x,
                y,
                width: self.size.width(),
                height: self.size.height(),
            });
        }

        Ok((y as usize * self.size.width() as usize + x as usize) * BYTES_PER_PIXEL)
    }
}
