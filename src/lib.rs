//! Focus Stats - Rust библиотека статистики задач

pub mod config;
pub mod error;
pub mod types;
pub mod models;
pub mod preprocessing;

pub use types::*;
pub use models::*;
pub use preprocessing::*;

pub use config::{ServerSettings, StatsConfig};
pub use error::StatsError;
