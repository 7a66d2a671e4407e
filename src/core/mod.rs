pub mod codec;
pub mod config;
pub mod formatter;
pub mod models;
pub mod summary;
