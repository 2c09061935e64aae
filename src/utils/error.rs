use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextractError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Upload of '{key}' to bucket '{bucket}' failed: {message}")]
    UploadError {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("{operation} call failed: {message}")]
    ServiceError { operation: String, message: String },

    #[error("{operation} response is missing {field}")]
    MissingResponseField { operation: String, field: String },

    #[error("job {job_id} finished with status {status}: {message}")]
    JobFailed {
        job_id: String,
        status: String,
        message: String,
    },

    #[error("job {job_id} still in progress after {attempts} status checks")]
    PollTimeout { job_id: String, attempts: u32 },
}

pub type Result<T> = std::result::Result<T, TextractError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    LocalIo,
    Remote,
    Job,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TextractError {
    /// 把 SDK 錯誤包成 ServiceError，保留完整的錯誤鏈
    pub fn service<E>(operation: &str, err: E) -> Self
    where
        E: std::error::Error,
    {
        TextractError::ServiceError {
            operation: operation.to_string(),
            message: aws_sdk_textract::error::DisplayErrorContext(&err).to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TextractError::ConfigError { .. }
            | TextractError::InvalidConfigValueError { .. }
            | TextractError::MissingConfigError { .. }
            | TextractError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            TextractError::IoError(_) => ErrorCategory::LocalIo,
            TextractError::UploadError { .. }
            | TextractError::ServiceError { .. }
            | TextractError::MissingResponseField { .. } => ErrorCategory::Remote,
            TextractError::JobFailed { .. } | TextractError::PollTimeout { .. } => {
                ErrorCategory::Job
            }
            TextractError::SerializationError(_) | TextractError::CsvError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Output => ErrorSeverity::Low,
            ErrorCategory::Job => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::LocalIo => ErrorSeverity::High,
            ErrorCategory::Remote => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TextractError::IoError(_) => {
                "Check that the document path exists and is readable".to_string()
            }
            TextractError::MissingConfigError { field } => format!(
                "Provide {} via command line, environment variable or config file",
                field
            ),
            TextractError::InvalidConfigValueError { field, .. }
            | TextractError::ConfigValidationError { field, .. } => {
                format!("Fix the value of {} and run again", field)
            }
            TextractError::ConfigError { .. } => {
                "Check the configuration file syntax".to_string()
            }
            TextractError::UploadError { bucket, .. } => format!(
                "Verify bucket '{}' exists in the configured region and your credentials can write to it",
                bucket
            ),
            TextractError::ServiceError { .. } | TextractError::MissingResponseField { .. } => {
                "Verify AWS credentials, region and that Textract supports the document format"
                    .to_string()
            }
            TextractError::JobFailed { .. } => {
                "Inspect the job status message; the document may be unsupported or corrupt"
                    .to_string()
            }
            TextractError::PollTimeout { .. } => {
                "Increase --max-poll-attempts or --poll-interval-ms for large documents".to_string()
            }
            TextractError::SerializationError(_) | TextractError::CsvError(_) => {
                "Try a different --format".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TextractError::JobFailed { message, .. } => format!("ERROR: job failed - {}", message),
            TextractError::IoError(e) => format!("Cannot read document: {}", e),
            other => other.to_string(),
        }
    }
}
