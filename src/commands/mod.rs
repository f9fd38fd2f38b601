pub mod config;
pub mod firmware;
