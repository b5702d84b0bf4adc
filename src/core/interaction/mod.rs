pub mod controller;
pub mod gesture;
pub mod limits;
