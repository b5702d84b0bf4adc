//! Pixel format conversion between the renderer's RGB buffers and RGBA surfaces.

use crate::core::data::colour::Colour;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelFormatError {
    #[error("rgb length {0} is not a multiple of 3")]
    RaggedRgb(usize),
    #[error("rgba length {actual} does not match expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Copies RGB pixel data into an RGBA surface with full alpha.
///
/// `dst` must hold exactly four bytes for every three in `src`.
pub fn copy_rgb_to_rgba(src: &[u8], dst: &mut [u8]) -> Result<(), PixelFormatError> {
    if src.len() % 3 != 0 {
        return Err(PixelFormatError::RaggedRgb(src.len()));
    }

    let expected = (src.len() / 3) * 4;
    if dst.len() != expected {
        return Err(PixelFormatError::LengthMismatch {
            expected,
            actual: dst.len(),
        });
    }

    for (src_pixel, dst_pixel) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        dst_pixel[..3].copy_from_slice(src_pixel);
        dst_pixel[3] = 255;
    }

    Ok(())
}

/// Paints every RGBA pixel in `dst` with `colour`.
pub fn fill_rgba(dst: &mut [u8], colour: Colour) {
    for pixel in dst.chunks_exact_mut(4) {
        pixel.copy_from_slice(&[colour.r, colour.g, colour.b, 255]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_rgb_to_rgba_known_values() {
        let src = vec![
            255, 0, 0, // red
            0, 255, 0, // green
            0, 0, 255, // blue
            255, 255, 255, // white
        ];
        let mut dst = vec![0; (src.len() / 3) * 4];

        copy_rgb_to_rgba(&src, &mut dst).unwrap();

        assert_eq!(
            dst,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 255
            ]
        );
    }

    #[test]
    fn test_copy_rgb_to_rgba_empty_buffers() {
        let mut dst: Vec<u8> = vec![];

        copy_rgb_to_rgba(&[], &mut dst).unwrap();

        assert!(dst.is_empty());
    }

    #[test]
    fn test_copy_rgb_to_rgba_rejects_ragged_source() {
        let mut dst = vec![0; 4];

        assert_eq!(
            copy_rgb_to_rgba(&[1, 2, 3, 4], &mut dst),
            Err(PixelFormatError::RaggedRgb(4))
        );
    }

    #[test]
    fn test_copy_rgb_to_rgba_rejects_wrong_surface_size() {
        let mut dst = vec![0; 12];

        assert_eq!(
            copy_rgb_to_rgba(&[10, 20, 30, 40, 50, 60], &mut dst),
            Err(PixelFormatError::LengthMismatch {
                expected: 8,
                actual: 12
            })
        );
        assert!(dst.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_rgba_paints_every_pixel() {
        let mut dst = vec![7; 8];

        fill_rgba(&mut dst, Colour::BLACK);

        assert_eq!(dst, vec![0, 0, 0, 255, 0, 0, 0, 255]);
    }
}
