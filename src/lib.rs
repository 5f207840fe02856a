pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod storage;
pub mod theme;
pub use error::{AppError, AppResult};
