pub mod animation;
pub mod color_map;
pub mod error;
pub mod file_io;
pub mod gallery;
pub mod grid_params;
pub mod image_utils;
pub mod parameter_grid;
pub mod stopwatch;
pub mod text;
