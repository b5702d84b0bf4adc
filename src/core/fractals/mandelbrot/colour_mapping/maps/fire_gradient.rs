use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
use crate::core::fractals::mandelbrot::colour_mapping::map::MandelbrotColourMap;

/// Black through red, orange and yellow to white.
#[derive(Debug)]
pub struct FireGradient {
    max_iterations: u32,
}

impl FireGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl ColourMap for FireGradient {
    fn map(&self, iterations: f64) -> Colour {
        let max = f64::from(self.max_iterations);

        if iterations >= max || iterations.is_nan() {
            return Colour::BLACK;
        }

        let t = (iterations / max).clamp(0.0, 1.0);

        let (r, g, b) = if t < 0.25 {
            let local_t = t / 0.25;
            ((local_t * 255.0) as u8, 0, 0)
        } else if t < 0.5 {
            let local_t = (t - 0.25) / 0.25;
            (255, (local_t * 165.0) as u8, 0)
        } else if t < 0.75 {
            let local_t = (t - 0.5) / 0.25;
            (255, (165.0 + local_t * 90.0) as u8, 0)
        } else {
            let local_t = (t - 0.75) / 0.25;
            (255, 255, (local_t * 255.0) as u8)
        };

        Colour { r, g, b }
    }

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}

impl MandelbrotColourMap for FireGradient {
    fn kind(&self) -> ColourMapKind {
        ColourMapKind::FireGradient
    }
}
