use crate::domain::model::{DocumentLocation, IdentityDocument, JobKind, ResultPage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait ObjectStore: Send + Sync {
    fn bucket(&self) -> &str;

    /// 以檔名作為 key 上傳本地檔案
    fn upload_file(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<DocumentLocation>> + Send;
}

#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze_id(&self, document: Vec<u8>) -> Result<Vec<IdentityDocument>>;
    async fn start_job(&self, kind: JobKind, location: &DocumentLocation) -> Result<String>;
    async fn get_job_page(
        &self,
        kind: JobKind,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<ResultPage>;
}

pub trait ConfigProvider: Send + Sync {
    fn bucket(&self) -> Option<&str>;
    fn poll_interval(&self) -> Duration;
    fn max_poll_attempts(&self) -> Option<u32>;
}
