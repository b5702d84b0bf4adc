pub mod algorithm;
pub mod colour_mapping;
pub mod errors;
pub mod params;
