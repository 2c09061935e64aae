use hello_textract::domain::model::{BlockType, DocumentLocation, JobKind, JobStatus};
use hello_textract::domain::ports::{DocumentAnalyzer, ObjectStore};
use hello_textract::{S3Storage, TextractAnalyzer, TextractError};
use httpmock::prelude::*;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

fn textract_client(endpoint: &str) -> aws_sdk_textract::Client {
    use aws_sdk_textract::config::{BehaviorVersion, Credentials, Region};

    let config = aws_sdk_textract::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .endpoint_url(endpoint)
        .build();
    aws_sdk_textract::Client::from_conf(config)
}

fn s3_client(endpoint: &str) -> aws_sdk_s3::Client {
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .endpoint_url(endpoint)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

fn location() -> DocumentLocation {
    DocumentLocation {
        bucket: "doc-inbox".to_string(),
        key: "scan.pdf".to_string(),
    }
}

#[tokio::test]
async fn test_analyze_id_maps_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .header("x-amz-target", "Textract.AnalyzeID");
        then.status(200)
            .header("content-type", JSON_CONTENT_TYPE)
            .body(
                serde_json::json!({
                    "IdentityDocuments": [{
                        "DocumentIndex": 1,
                        "IdentityDocumentFields": [
                            {
                                "Type": {"Text": "FIRST_NAME", "Confidence": 99.1},
                                "ValueDetection": {"Text": "JANE", "Confidence": 97.5}
                            },
                            {
                                "Type": {"Text": "EXPIRATION_DATE", "Confidence": 98.0},
                                "ValueDetection": {"Text": "01/01/2030"}
                            }
                        ]
                    }],
                    "DocumentMetadata": {"Pages": 1},
                    "AnalyzeIDModelVersion": "1.0"
                })
                .to_string(),
            );
    });

    let analyzer = TextractAnalyzer::new(textract_client(&server.base_url()));
    let documents = assert_ok!(analyzer.analyze_id(b"fake-jpeg".to_vec()).await);

    mock.assert();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].document_index, 1);
    assert_eq!(documents[0].fields[0].field_type, "FIRST_NAME");
    assert_eq!(documents[0].fields[0].value, "JANE");
    assert_eq!(documents[0].fields[0].confidence, Some(97.5));
    assert_eq!(documents[0].fields[1].value, "01/01/2030");
    assert_eq!(documents[0].fields[1].confidence, None);
}

#[tokio::test]
async fn test_start_text_detection_sends_s3_location() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .header("x-amz-target", "Textract.StartDocumentTextDetection")
            .body_contains("doc-inbox")
            .body_contains("scan.pdf");
        then.status(200)
            .header("content-type", JSON_CONTENT_TYPE)
            .body(r#"{"JobId":"text-job-1"}"#);
    });

    let analyzer = TextractAnalyzer::new(textract_client(&server.base_url()));
    let job_id = assert_ok!(analyzer.start_job(JobKind::TextDetection, &location()).await);

    mock.assert();
    assert_eq!(job_id, "text-job-1");
}

#[tokio::test]
async fn test_start_table_analysis_requests_tables_feature() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .header("x-amz-target", "Textract.StartDocumentAnalysis")
            .body_contains("TABLES");
        then.status(200)
            .header("content-type", JSON_CONTENT_TYPE)
            .body(r#"{"JobId":"table-job-1"}"#);
    });

    let analyzer = TextractAnalyzer::new(textract_client(&server.base_url()));
    let job_id = assert_ok!(analyzer.start_job(JobKind::TableAnalysis, &location()).await);

    mock.assert();
    assert_eq!(job_id, "table-job-1");
}

#[tokio::test]
async fn test_start_job_without_job_id_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .header("x-amz-target", "Textract.StartDocumentTextDetection");
        then.status(200)
            .header("content-type", JSON_CONTENT_TYPE)
            .body("{}");
    });

    let analyzer = TextractAnalyzer::new(textract_client(&server.base_url()));
    let err = assert_err!(analyzer.start_job(JobKind::TextDetection, &location()).await);

    assert!(matches!(
        err,
        TextractError::MissingResponseField { ref field, .. } if field == "JobId"
    ));
}

#[tokio::test]
async fn test_get_text_detection_page_with_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .header("x-amz-target", "Textract.GetDocumentTextDetection")
            .body_contains("text-job-1")
            .body_contains("page-2-token");
        then.status(200)
            .header("content-type", JSON_CONTENT_TYPE)
            .body(
                serde_json::json!({
                    "JobStatus": "SUCCEEDED",
                    "Blocks": [
                        {
                            "BlockType": "LINE",
                            "Id": "line-1",
                            "Text": "Total due",
                            "Confidence": 99.2,
                            "Page": 2,
                            "Relationships": [{"Type": "CHILD", "Ids": ["w-1", "w-2"]}]
                        },
                        {"BlockType": "WORD", "Id": "w-1", "Text": "Total", "Confidence": 99.5, "Page": 2}
                    ],
                    "NextToken": "page-3-token"
                })
                .to_string(),
            );
    });

    let analyzer = TextractAnalyzer::new(textract_client(&server.base_url()));
    let page = assert_ok!(
        analyzer
            .get_job_page(JobKind::TextDetection, "text-job-1", Some("page-2-token"))
            .await
    );

    mock.assert();
    assert_eq!(page.status, JobStatus::Succeeded);
    assert_eq!(page.next_token.as_deref(), Some("page-3-token"));
    assert_eq!(page.blocks.len(), 2);
    assert_eq!(page.blocks[0].block_type, BlockType::Line);
    assert_eq!(page.blocks[0].page, Some(2));
    assert_eq!(page.blocks[0].child_ids, vec!["w-1", "w-2"]);
    assert_eq!(page.blocks[1].text.as_deref(), Some("Total"));
}

#[tokio::test]
async fn test_get_document_analysis_in_progress() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .header("x-amz-target", "Textract.GetDocumentAnalysis");
        then.status(200)
            .header("content-type", JSON_CONTENT_TYPE)
            .body(r#"{"JobStatus":"IN_PROGRESS"}"#);
    });

    let analyzer = TextractAnalyzer::new(textract_client(&server.base_url()));
    let page = assert_ok!(
        analyzer
            .get_job_page(JobKind::TableAnalysis, "table-job-1", None)
            .await
    );

    mock.assert();
    assert_eq!(page.status, JobStatus::InProgress);
    assert!(page.blocks.is_empty());
    assert!(page.next_token.is_none());
}

#[tokio::test]
async fn test_service_error_is_mapped() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .header("x-amz-target", "Textract.GetDocumentTextDetection");
        then.status(400)
            .header("content-type", JSON_CONTENT_TYPE)
            .body(r#"{"__type":"InvalidJobIdException","message":"job does not exist"}"#);
    });

    let analyzer = TextractAnalyzer::new(textract_client(&server.base_url()));
    let err = assert_err!(
        analyzer
            .get_job_page(JobKind::TextDetection, "missing-job", None)
            .await
    );

    match err {
        TextractError::ServiceError { operation, .. } => {
            assert_eq!(operation, "GetDocumentTextDetection");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_s3_upload_uses_file_name_as_key() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/doc-inbox/receipt.png");
        then.status(200).header("ETag", "\"abc123\"");
    });

    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("receipt.png");
    std::fs::write(&file, b"not really a png").unwrap();

    let storage = S3Storage::new(s3_client(&server.base_url()), "doc-inbox".to_string());
    let uploaded = assert_ok!(storage.upload_file(&file).await);

    mock.assert();
    assert_eq!(
        uploaded,
        DocumentLocation {
            bucket: "doc-inbox".to_string(),
            key: "receipt.png".to_string(),
        }
    );
}

#[tokio::test]
async fn test_s3_upload_of_missing_file_never_calls_s3() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT);
        then.status(200);
    });

    let storage = S3Storage::new(s3_client(&server.base_url()), "doc-inbox".to_string());
    let err = assert_err!(
        storage
            .upload_file(std::path::Path::new("/no/such/scan.pdf"))
            .await
    );

    mock.assert_hits(0);
    assert!(matches!(err, TextractError::IoError(_)));
}
