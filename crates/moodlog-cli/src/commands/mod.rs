pub mod config;
pub mod sample;
pub mod stats;
