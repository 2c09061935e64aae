use clap::error::ErrorKind;
use clap::Parser;
use hello_textract::adapters::aws;
use hello_textract::core::render::render_report;
use hello_textract::domain::ports::ConfigProvider;
use hello_textract::utils::{logger, validation::Validate};
use hello_textract::{
    AnalysisEngine, CliConfig, OutputFormat, S3Storage, TextractAnalyzer, TextractError,
};
use std::io::Write;
use std::path::PathBuf;

const USAGE: &str =
    "?Invalid parameter - command line format: hello-textract <file> text|id|table";

// 成功與失敗都回傳同一個代碼
const EXIT_CODE: i32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match CliConfig::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("{}", USAGE);
            std::process::exit(EXIT_CODE);
        }
    };

    // 初始化日誌
    if cli.format == Some(OutputFormat::Json) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hello-textract");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.into_app_config() {
        Ok(config) => config,
        Err(e) => exit_with_error(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        println!("{}", USAGE);
        exit_with_error(&e);
    }

    let sdk_config =
        aws::load_sdk_config(config.region.as_deref(), config.endpoint_url.as_deref()).await;
    let storage = S3Storage::new(
        aws::s3_client(&sdk_config, config.endpoint_url.is_some()),
        config.bucket().unwrap_or_default().to_string(),
    );
    let analyzer = TextractAnalyzer::new(aws::textract_client(&sdk_config));

    let analysis = config.analysis;
    let format = config.format;
    let file = PathBuf::from(&config.file);
    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = AnalysisEngine::new_with_monitoring(storage, analyzer, config, monitor_enabled);

    // 結果要給程式讀時，進度訊息改寫到 stderr
    let mut progress: Box<dyn Write + Send> = match format {
        OutputFormat::Console => Box::new(std::io::stdout()),
        OutputFormat::Json | OutputFormat::Csv => Box::new(std::io::stderr()),
    };

    match engine.run(analysis, &file, &mut progress).await {
        Ok(report) => {
            render_report(&report, format, &mut std::io::stdout())?;
            tracing::info!("✅ {:?} analysis of {} completed", analysis, file.display());
        }
        Err(e) => exit_with_error(&e),
    }

    std::process::exit(EXIT_CODE);
}

fn exit_with_error(e: &TextractError) -> ! {
    tracing::error!(
        "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    match e {
        TextractError::JobFailed { .. } => println!("{}", e.user_friendly_message()),
        _ => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
        }
    }

    std::process::exit(EXIT_CODE);
}
