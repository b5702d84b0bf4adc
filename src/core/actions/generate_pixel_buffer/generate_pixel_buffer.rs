use crate::core::actions::cancellation::{check_cancelled, CancelToken, Cancelled};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};

#[derive(Debug, thiserror::Error)]
pub enum GeneratePixelBufferError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Streams RGB bytes for every escape count into a preallocated buffer,
/// checking `cancel` every `CANCEL_CHECK_INTERVAL_PIXELS` pixels.
pub fn generate_pixel_buffer<CMap, C>(
    input: &[f64],
    mapper: &CMap,
    size: CanvasSize,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    CMap: ColourMap + ?Sized,
    C: CancelToken + ?Sized,
{
    let mut buffer: PixelBufferData = Vec::with_capacity(size.pixel_count() * 3);

    for (i, &value) in input.iter().enumerate() {
        check_cancelled(i, cancel)?;

        let Colour { r, g, b } = mapper.map(value);

        buffer.push(r);
        buffer.push(g);
        buffer.push(b);
    }

    Ok(PixelBuffer::from_data(size, buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Debug)]
    struct StubColourMap {}

    impl ColourMap for StubColourMap {
        fn map(&self, value: f64) -> Colour {
            let v = value as u8;
            Colour { r: v, g: v, b: v }
        }

        fn display_name(&self) -> &str {
            "Stub"
        }
    }

    fn size(width: u32, height: u32) -> CanvasSize {
        CanvasSize::new(width, height).unwrap()
    }

    #[test]
    fn test_generates_pixel_buffer_correctly() {
        let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let expected: PixelBufferData = vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6];

        let result = generate_pixel_buffer(&input, &StubColourMap {}, size(3, 2), &NeverCancel).unwrap();

        assert_eq!(result.buffer(), &expected);
        assert_eq!(result.size(), size(3, 2));
    }

    #[test]
    fn test_input_size_mismatch_returns_err() {
        let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

        let result = generate_pixel_buffer(&input, &StubColourMap {}, size(2, 2), &NeverCancel);

        assert!(matches!(
            result,
            Err(GeneratePixelBufferError::PixelBuffer(PixelBufferError::BoundsMismatch {
                expected: 12,
                actual: 18
            }))
        ));
    }

    #[test]
    fn test_cancelled_does_not_create_pixel_buffer() {
        let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let cancelled = AtomicBool::new(true);
        let cancel_token = || cancelled.load(Ordering::Relaxed);

        let result = generate_pixel_buffer(&input, &StubColourMap {}, size(3, 2), &cancel_token);

        assert!(matches!(result, Err(GeneratePixelBufferError::Cancelled(_))));
    }

    #[test]
    fn test_error_displays_cancelled() {
        let err = GeneratePixelBufferError::Cancelled(Cancelled);

        assert_eq!(err.to_string(), "operation cancelled");
    }
}
