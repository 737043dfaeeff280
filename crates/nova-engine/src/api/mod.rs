pub mod callbacks;
pub mod config;
