use crate::core::poller::JobPoller;
use crate::core::{AnalysisReport, ConfigProvider, DocumentAnalyzer, JobKind, JobReport, ObjectStore};
use crate::domain::model::{IdentityDocument, JobStatus};
use crate::utils::error::{Result, TextractError};
use crate::utils::monitor::RunMonitor;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// 文字偵測 (非同步作業)
    Text,
    /// 身分證件欄位 (同步 AnalyzeID)
    Id,
    /// 表格分析 (非同步作業)
    Table,
}

impl AnalysisType {
    pub fn job_kind(&self) -> Option<JobKind> {
        match self {
            AnalysisType::Text => Some(JobKind::TextDetection),
            AnalysisType::Table => Some(JobKind::TableAnalysis),
            AnalysisType::Id => None,
        }
    }
}

/// 持有兩個外部服務的 client，一次執行一種分析
pub struct AnalysisEngine<S: ObjectStore, A: DocumentAnalyzer, C: ConfigProvider> {
    storage: S,
    analyzer: A,
    config: C,
    monitor: RunMonitor,
}

impl<S: ObjectStore, A: DocumentAnalyzer, C: ConfigProvider> AnalysisEngine<S, A, C> {
    pub fn new(storage: S, analyzer: A, config: C) -> Self {
        Self::new_with_monitoring(storage, analyzer, config, false)
    }

    pub fn new_with_monitoring(storage: S, analyzer: A, config: C, monitor_enabled: bool) -> Self {
        Self {
            storage,
            analyzer,
            config,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub async fn run<W: Write + Send>(
        &self,
        analysis: AnalysisType,
        file: &Path,
        progress: &mut W,
    ) -> Result<AnalysisReport> {
        tracing::info!("🚀 Starting {:?} analysis of {}", analysis, file.display());

        let report = match analysis {
            AnalysisType::Id => AnalysisReport::Identity {
                documents: self.analyze_id(file, progress).await?,
            },
            AnalysisType::Text => AnalysisReport::Text(self.analyze_text(file, progress).await?),
            AnalysisType::Table => AnalysisReport::Table(self.analyze_table(file, progress).await?),
        };

        self.monitor.log_phase("done");
        Ok(report)
    }

    pub async fn analyze_id<W: Write + Send>(
        &self,
        file: &Path,
        progress: &mut W,
    ) -> Result<Vec<IdentityDocument>> {
        writeln!(progress, "Start document ID analysis")?;

        let bytes = tokio::fs::read(file).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), file.display());
        self.monitor.log_phase("read");

        let documents = self.analyzer.analyze_id(bytes).await?;
        tracing::info!("✅ AnalyzeID returned {} identity documents", documents.len());
        Ok(documents)
    }

    pub async fn analyze_text<W: Write + Send>(&self, file: &Path, progress: &mut W) -> Result<JobReport> {
        self.run_job(JobKind::TextDetection, file, progress).await
    }

    pub async fn analyze_table<W: Write + Send>(&self, file: &Path, progress: &mut W) -> Result<JobReport> {
        self.run_job(JobKind::TableAnalysis, file, progress).await
    }

    async fn run_job<W: Write + Send>(
        &self,
        kind: JobKind,
        file: &Path,
        progress: &mut W,
    ) -> Result<JobReport> {
        let started_at = Utc::now();

        // 上傳到 S3
        writeln!(
            progress,
            "Upload {} to {} bucket",
            file.display(),
            self.storage.bucket()
        )?;
        let document = self.storage.upload_file(file).await?;
        self.monitor.log_phase("upload");

        // 啟動作業
        writeln!(progress, "Starting {} job", kind.describe())?;
        let job_id = self.analyzer.start_job(kind, &document).await?;
        writeln!(progress, "Job ID: {}", job_id)?;
        tracing::info!("📋 {} job {} started", kind.describe(), job_id);

        // 等待完成
        let poller = JobPoller::new(self.config.poll_interval(), self.config.max_poll_attempts());
        let terminal = poller
            .wait_for_completion(&self.analyzer, kind, &job_id, progress)
            .await?;
        self.monitor.log_phase("poll");

        if terminal.status != JobStatus::Succeeded {
            tracing::warn!("❌ Job {} ended with status {}", job_id, terminal.status);
            return Err(TextractError::JobFailed {
                job_id,
                status: terminal.status.to_string(),
                message: terminal.status_message.unwrap_or_default(),
            });
        }

        let (blocks, pages_fetched) = poller
            .collect_pages(&self.analyzer, kind, &job_id, terminal)
            .await?;
        self.monitor.log_phase("results");
        tracing::info!(
            "✅ Job {} returned {} blocks across {} pages",
            job_id,
            blocks.len(),
            pages_fetched
        );

        Ok(JobReport {
            kind,
            job_id,
            document,
            pages_fetched,
            blocks,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
