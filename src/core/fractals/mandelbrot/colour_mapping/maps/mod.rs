pub mod fire_gradient;
pub mod rainbow_bands;
