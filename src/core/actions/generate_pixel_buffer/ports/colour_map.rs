use crate::core::data::colour::Colour;

/// Maps a smooth escape count to a colour.
pub trait ColourMap {
    fn map(&self, iterations: f64) -> Colour;

    fn display_name(&self) -> &str;
}
