// Adapters layer: AWS-backed implementations of the domain ports.

pub mod aws;
pub mod s3;
pub mod textract;

pub use s3::S3Storage;
pub use textract::TextractAnalyzer;
