use crate::config::app::AppConfig;
use crate::config::toml_config::TomlConfig;
use crate::core::engine::AnalysisType;
use crate::core::render::OutputFormat;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "hello-textract", version)]
#[command(about = "Upload a document to S3 and analyze it with Amazon Textract")]
pub struct CliConfig {
    /// Local document to analyze
    pub file: String,

    /// Kind of analysis to run
    #[arg(value_enum, default_value_t = AnalysisType::Text)]
    pub analysis: AnalysisType,

    /// Bucket the document is uploaded to (text and table analysis)
    #[arg(long, env = "TEXTRACT_BUCKET")]
    pub bucket: Option<String>,

    #[arg(long, env = "TEXTRACT_REGION")]
    pub region: Option<String>,

    /// Override the AWS endpoint, e.g. http://localhost:4566
    #[arg(long, env = "TEXTRACT_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, env = "TEXTRACT_CONFIG")]
    pub config: Option<String>,

    #[arg(long, help = "Delay between job status checks in milliseconds [default: 1000]")]
    pub poll_interval_ms: Option<u64>,

    #[arg(long, help = "Give up after this many status checks [default: unlimited]")]
    pub max_poll_attempts: Option<u32>,

    #[arg(long, value_enum, help = "Result format [default: console]")]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory stats per phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// 命令列 > 環境變數 > TOML > 預設值
    pub fn into_app_config(self) -> Result<AppConfig> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };
        Ok(self.merge(file_config))
    }

    pub fn merge(self, file_config: Option<TomlConfig>) -> AppConfig {
        let file_config = file_config.unwrap_or_default();

        AppConfig {
            file: self.file,
            analysis: self.analysis,
            bucket: self.bucket.or(file_config.aws.bucket),
            region: self.region.or(file_config.aws.region),
            endpoint_url: self.endpoint_url.or(file_config.aws.endpoint_url),
            poll_interval_ms: self
                .poll_interval_ms
                .or(file_config.polling.interval_ms)
                .unwrap_or(AppConfig::DEFAULT_POLL_INTERVAL_MS),
            max_poll_attempts: self.max_poll_attempts.or(file_config.polling.max_attempts),
            format: self.format.or(file_config.output.format).unwrap_or_default(),
            verbose: self.verbose,
            monitor: self.monitor || file_config.output.monitor.unwrap_or(false),
        }
    }
}
