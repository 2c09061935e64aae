use crate::domain::model::DocumentLocation;
use crate::domain::ports::ObjectStore;
use crate::utils::error::{Result, TextractError};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

/// 物件 key 只取檔名，不含目錄
pub fn object_key(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| TextractError::InvalidConfigValueError {
            field: "file".to_string(),
            value: path.display().to_string(),
            reason: "Path has no usable file name".to_string(),
        })
}

impl ObjectStore for S3Storage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload_file(&self, path: &Path) -> Result<DocumentLocation> {
        let key = object_key(path)?;
        let size = tokio::fs::metadata(path).await?.len();
        tracing::info!(
            "📤 Uploading {} ({} bytes) to s3://{}/{}",
            path.display(),
            size,
            self.bucket,
            key
        );

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| TextractError::UploadError {
                bucket: self.bucket.clone(),
                key: key.clone(),
                message: e.to_string(),
            })?;

        let output = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(body)
            .send()
            .await
            .map_err(|e| TextractError::UploadError {
                bucket: self.bucket.clone(),
                key: key.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!("Upload finished, ETag: {:?}", output.e_tag());

        Ok(DocumentLocation {
            bucket: self.bucket.clone(),
            key,
        })
    }
}
