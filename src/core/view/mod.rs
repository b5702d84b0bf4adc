pub mod limits;
pub mod viewport;
