pub mod actions;
pub mod camera;
pub mod data;
pub mod fractals;
pub mod interaction;
pub mod util;
pub mod view;
