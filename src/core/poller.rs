use crate::domain::model::{Block, JobKind, ResultPage};
use crate::domain::ports::DocumentAnalyzer;
use crate::utils::error::{Result, TextractError};
use std::io::Write;
use std::time::Duration;

/// 固定間隔輪詢作業狀態，再把分頁結果串起來
#[derive(Debug, Clone)]
pub struct JobPoller {
    interval: Duration,
    max_attempts: Option<u32>,
}

impl JobPoller {
    pub fn new(interval: Duration, max_attempts: Option<u32>) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// 回傳第一個非 IN_PROGRESS 的回應，它同時也是結果的第一頁
    pub async fn wait_for_completion<A, W>(
        &self,
        analyzer: &A,
        kind: JobKind,
        job_id: &str,
        progress: &mut W,
    ) -> Result<ResultPage>
    where
        A: DocumentAnalyzer + ?Sized,
        W: Write + Send,
    {
        write!(progress, "Waiting for job completion")?;
        progress.flush()?;

        let mut attempts: u32 = 0;
        loop {
            let page = analyzer.get_job_page(kind, job_id, None).await?;
            attempts += 1;

            if page.status.is_terminal() {
                writeln!(progress)?;
                tracing::debug!(
                    "Job {} reached {} after {} status checks",
                    job_id,
                    page.status,
                    attempts
                );
                return Ok(page);
            }

            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    writeln!(progress)?;
                    return Err(TextractError::PollTimeout {
                        job_id: job_id.to_string(),
                        attempts,
                    });
                }
            }

            write!(progress, ".")?;
            progress.flush()?;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// 從終止頁開始，沿著 next_token 取完所有頁面
    pub async fn collect_pages<A>(
        &self,
        analyzer: &A,
        kind: JobKind,
        job_id: &str,
        first: ResultPage,
    ) -> Result<(Vec<Block>, usize)>
    where
        A: DocumentAnalyzer + ?Sized,
    {
        let mut pages = 1;
        let mut next_token = first.continuation().map(str::to_string);
        let mut blocks = first.blocks;

        while let Some(token) = next_token {
            let page = analyzer.get_job_page(kind, job_id, Some(&token)).await?;
            pages += 1;
            tracing::debug!("Fetched result page {} ({} blocks)", pages, page.blocks.len());

            next_token = page.continuation().map(str::to_string);
            blocks.extend(page.blocks);
        }

        Ok((blocks, pages))
    }
}
