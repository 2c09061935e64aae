use crate::core::engine::AnalysisType;
use crate::core::render::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::*;
use std::time::Duration;

/// 合併命令列、環境變數與 TOML 之後的最終設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub file: String,
    pub analysis: AnalysisType,
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: Option<u32>,
    pub format: OutputFormat,
    pub verbose: bool,
    pub monitor: bool,
}

impl AppConfig {
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
    pub const MIN_POLL_INTERVAL_MS: u64 = 10;
    pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

    pub fn needs_bucket(&self) -> bool {
        self.analysis.job_kind().is_some()
    }
}

impl ConfigProvider for AppConfig {
    fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn max_poll_attempts(&self) -> Option<u32> {
        self.max_poll_attempts
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("file", &self.file)?;

        let allowed = if self.needs_bucket() {
            ASYNC_DOCUMENT_EXTENSIONS
        } else {
            IDENTITY_DOCUMENT_EXTENSIONS
        };
        validate_document_extension("file", &self.file, allowed)?;
        validate_existing_file("file", &self.file)?;

        if self.needs_bucket() {
            let bucket = validate_required_field("bucket", &self.bucket)?;
            validate_s3_bucket_name("bucket", bucket)?;
        }

        if let Some(region) = &self.region {
            validate_aws_region("region", region)?;
        }

        if let Some(endpoint_url) = &self.endpoint_url {
            validate_url("endpoint_url", endpoint_url)?;
        }

        validate_range(
            "poll_interval_ms",
            self.poll_interval_ms,
            Self::MIN_POLL_INTERVAL_MS,
            Self::MAX_POLL_INTERVAL_MS,
        )?;

        if let Some(max) = self.max_poll_attempts {
            validate_range("max_poll_attempts", max, 1, u32::MAX)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TextractError;
    use tempfile::TempDir;

    fn config(file: &str, analysis: AnalysisType) -> AppConfig {
        AppConfig {
            file: file.to_string(),
            analysis,
            bucket: Some("doc-uploads".to_string()),
            region: Some("us-east-1".to_string()),
            endpoint_url: None,
            poll_interval_ms: AppConfig::DEFAULT_POLL_INTERVAL_MS,
            max_poll_attempts: None,
            format: OutputFormat::Console,
            verbose: false,
            monitor: false,
        }
    }

    /// 在暫存目錄建立文件，回傳完整路徑
    fn document(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, b"document").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_valid_configs() {
        let dir = TempDir::new().unwrap();
        assert!(config(&document(&dir, "scan.pdf"), AnalysisType::Text).validate().is_ok());
        assert!(config(&document(&dir, "grid.tiff"), AnalysisType::Table).validate().is_ok());
        assert!(config(&document(&dir, "license.png"), AnalysisType::Id).validate().is_ok());
    }

    #[test]
    fn test_missing_document_is_invalid_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.png").to_string_lossy().into_owned();

        let result = config(&missing, AnalysisType::Id).validate();

        assert!(matches!(
            result,
            Err(TextractError::InvalidConfigValueError { ref field, .. }) if field == "file"
        ));
    }

    #[test]
    fn test_directory_is_not_a_document() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("scans.pdf");
        std::fs::create_dir(&folder).unwrap();

        assert!(config(&folder.to_string_lossy(), AnalysisType::Text).validate().is_err());
    }

    #[test]
    fn test_bucket_required_only_for_jobs() {
        let dir = TempDir::new().unwrap();
        let mut id = config(&document(&dir, "license.jpg"), AnalysisType::Id);
        id.bucket = None;
        assert!(id.validate().is_ok());

        let mut text = config(&document(&dir, "scan.pdf"), AnalysisType::Text);
        text.bucket = None;
        assert!(matches!(
            text.validate(),
            Err(TextractError::MissingConfigError { ref field }) if field == "bucket"
        ));
    }

    #[test]
    fn test_id_analysis_rejects_pdf() {
        let dir = TempDir::new().unwrap();
        assert!(config(&document(&dir, "license.pdf"), AnalysisType::Id).validate().is_err());
    }

    #[test]
    fn test_poll_settings_are_bounded() {
        let dir = TempDir::new().unwrap();
        let file = document(&dir, "scan.pdf");

        let mut too_fast = config(&file, AnalysisType::Text);
        too_fast.poll_interval_ms = 1;
        assert!(too_fast.validate().is_err());

        let mut zero_attempts = config(&file, AnalysisType::Text);
        zero_attempts.max_poll_attempts = Some(0);
        assert!(zero_attempts.validate().is_err());
    }

    #[test]
    fn test_bad_endpoint_url() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&document(&dir, "scan.pdf"), AnalysisType::Text);
        cfg.endpoint_url = Some("localhost:4566".to_string());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_provider() {
        let cfg = config("scan.pdf", AnalysisType::Text);
        assert_eq!(cfg.bucket(), Some("doc-uploads"));
        assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
        assert_eq!(cfg.max_poll_attempts(), None);
    }
}
