pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{S3Storage, TextractAnalyzer};
pub use config::AppConfig;
pub use crate::core::engine::{AnalysisEngine, AnalysisType};
pub use crate::core::render::OutputFormat;
pub use utils::error::{Result, TextractError};
