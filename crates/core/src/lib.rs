pub mod config;
pub mod models;
pub mod source;
pub mod util;
