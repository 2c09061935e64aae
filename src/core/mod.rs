pub mod engine;
pub mod poller;
pub mod render;

pub use crate::domain::model::{AnalysisReport, JobKind, JobReport};
pub use crate::domain::ports::{ConfigProvider, DocumentAnalyzer, ObjectStore};
pub use crate::utils::error::Result;
