use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// 上傳後的物件位置，作為非同步作業的輸入
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLocation {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    TextDetection,
    TableAnalysis,
}

impl JobKind {
    pub fn start_operation(&self) -> &'static str {
        match self {
            JobKind::TextDetection => "StartDocumentTextDetection",
            JobKind::TableAnalysis => "StartDocumentAnalysis",
        }
    }

    pub fn get_operation(&self) -> &'static str {
        match self {
            JobKind::TextDetection => "GetDocumentTextDetection",
            JobKind::TableAnalysis => "GetDocumentAnalysis",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            JobKind::TextDetection => "document text detection",
            JobKind::TableAnalysis => "document analysis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    InProgress,
    Succeeded,
    Failed,
    PartialSuccess,
    Other(String),
}

impl JobStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "IN_PROGRESS" => JobStatus::InProgress,
            "SUCCEEDED" => JobStatus::Succeeded,
            "FAILED" => JobStatus::Failed,
            "PARTIAL_SUCCESS" => JobStatus::PartialSuccess,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::PartialSuccess => "PARTIAL_SUCCESS",
            JobStatus::Other(value) => value,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::InProgress)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    Other(String),
}

impl BlockType {
    pub fn parse(value: &str) -> Self {
        match value {
            "PAGE" => BlockType::Page,
            "LINE" => BlockType::Line,
            "WORD" => BlockType::Word,
            "TABLE" => BlockType::Table,
            "CELL" => BlockType::Cell,
            other => BlockType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Page => "PAGE",
            BlockType::Line => "LINE",
            BlockType::Word => "WORD",
            BlockType::Table => "TABLE",
            BlockType::Cell => "CELL",
            BlockType::Other(value) => value,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub id: String,
    pub block_type: BlockType,
    pub text: Option<String>,
    pub confidence: Option<f32>,
    pub page: Option<i32>,
    pub row_index: Option<i32>,
    pub column_index: Option<i32>,
    /// CHILD 關聯的 block id
    pub child_ids: Vec<String>,
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            confidence: None,
            page: None,
            row_index: None,
            column_index: None,
            child_ids: Vec::new(),
        }
    }
}

/// 一次 Get* 呼叫的回應
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub status: JobStatus,
    pub status_message: Option<String>,
    pub blocks: Vec<Block>,
    pub next_token: Option<String>,
}

impl ResultPage {
    /// 空字串的 token 視為沒有下一頁
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityField {
    pub field_type: String,
    pub value: String,
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityDocument {
    pub document_index: i32,
    pub fields: Vec<IdentityField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub kind: JobKind,
    pub job_id: String,
    pub document: DocumentLocation,
    pub pages_fetched: usize,
    pub blocks: Vec<Block>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "analysis", rename_all = "snake_case")]
pub enum AnalysisReport {
    Identity { documents: Vec<IdentityDocument> },
    Text(JobReport),
    Table(JobReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_round_trip_and_terminal() {
        assert_eq!(JobStatus::parse("IN_PROGRESS"), JobStatus::InProgress);
        assert!(!JobStatus::InProgress.is_terminal());
        assert!(JobStatus::Failed.is_terminal());

        let unknown = JobStatus::parse("EXPIRED");
        assert_eq!(unknown, JobStatus::Other("EXPIRED".to_string()));
        assert!(unknown.is_terminal());
        assert_eq!(unknown.to_string(), "EXPIRED");
    }

    #[test]
    fn test_block_type_serializes_as_service_name() {
        let mut block = Block::new("b-1", BlockType::parse("LINE"));
        block.text = Some("Hello".to_string());

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["block_type"], "LINE");
        assert_eq!(json["text"], "Hello");
    }

    #[test]
    fn test_empty_next_token_ends_pagination() {
        let page = ResultPage {
            status: JobStatus::Succeeded,
            status_message: None,
            blocks: vec![],
            next_token: Some(String::new()),
        };
        assert_eq!(page.continuation(), None);
    }
}
