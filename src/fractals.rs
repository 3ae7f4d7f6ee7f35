pub mod common;
pub mod julia;
pub mod quadratic_map;
