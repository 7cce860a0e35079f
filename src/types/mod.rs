pub mod config;
pub mod near;
