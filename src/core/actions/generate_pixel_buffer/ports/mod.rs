pub mod colour_map;
