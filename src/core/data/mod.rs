pub mod canvas_size;
pub mod colour;
pub mod complex_point;
pub mod frame_params;
pub mod pixel_buffer;
pub mod pixel_point;
