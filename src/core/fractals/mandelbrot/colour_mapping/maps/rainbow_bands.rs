use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
use crate::core::fractals::mandelbrot::colour_mapping::map::MandelbrotColourMap;

const HUE_OFFSET: f64 = 0.95;
const HUE_CYCLES: f64 = 10.0;
const BASE_VALUE: f64 = 0.5;
const VALUE_RANGE: f64 = 0.45;

/// Hue cycling through the spectrum ten times over the iteration range, with
/// brightness rising towards the boundary of the set.
#[must_use]
pub fn colour_for_iteration(iterations: f64, max_iterations: u32) -> Colour {
    let max = f64::from(max_iterations);

    if iterations >= max || iterations.is_nan() {
        return Colour::BLACK;
    }

    let t = (iterations / max).max(0.0);
    let hue = (360.0 * (HUE_OFFSET + HUE_CYCLES * t)).rem_euclid(360.0);
    let value = BASE_VALUE + VALUE_RANGE * (1.0 - (-t).exp());

    hsv_to_rgb(hue, 1.0, value)
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Colour {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Colour {
        r: to_channel(r + m),
        g: to_channel(g + m),
        b: to_channel(b + m),
    }
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[derive(Debug)]
pub struct RainbowBands {
    max_iterations: u32,
}

impl RainbowBands {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl ColourMap for RainbowBands {
    fn map(&self, iterations: f64) -> Colour {
        colour_for_iteration(iterations, self.max_iterations)
    }

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}

impl MandelbrotColourMap for RainbowBands {
    fn kind(&self) -> ColourMapKind {
        ColourMapKind::RainbowBands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_set_is_black() {
        assert_eq!(colour_for_iteration(100.0, 100), Colour::BLACK);
        assert_eq!(colour_for_iteration(150.0, 100), Colour::BLACK);
    }

    #[test]
    fn test_zero_iterations_is_dim_magenta_red() {
        assert_eq!(colour_for_iteration(0.0, 100), Colour { r: 128, g: 0, b: 38 });
    }

    #[test]
    fn test_negative_counts_clamp_to_zero() {
        assert_eq!(colour_for_iteration(-3.0, 100), colour_for_iteration(0.0, 100));
        assert_eq!(
            colour_for_iteration(f64::NEG_INFINITY, 100),
            colour_for_iteration(0.0, 100)
        );
    }

    #[test]
    fn test_brightness_grows_with_iterations() {
        let brightest = |c: Colour| c.r.max(c.g).max(c.b);

        let low = colour_for_iteration(0.0, 100);
        let high = colour_for_iteration(99.0, 100);

        assert!(brightest(high) > brightest(low));
    }

    #[test]
    fn test_hsv_primary_sectors() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Colour { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Colour { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Colour { r: 0, g: 0, b: 255 });
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), Colour { r: 255, g: 255, b: 0 });
    }

    #[test]
    fn test_map_matches_free_function() {
        let map = RainbowBands::new(256);

        for iterations in [0.0, 1.5, 17.25, 255.9, 256.0] {
            assert_eq!(map.map(iterations), colour_for_iteration(iterations, 256));
        }
    }
}
