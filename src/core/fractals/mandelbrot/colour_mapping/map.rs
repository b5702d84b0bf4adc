use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;

pub trait MandelbrotColourMap: ColourMap + Send + Sync {
    fn kind(&self) -> ColourMapKind;
}
