use crate::domain::model::{
    Block, BlockType, DocumentLocation, IdentityDocument, IdentityField, JobKind, JobStatus,
    ResultPage,
};
use crate::domain::ports::DocumentAnalyzer;
use crate::utils::error::{Result, TextractError};
use async_trait::async_trait;
use aws_sdk_textract::primitives::Blob;
use aws_sdk_textract::types;
use aws_sdk_textract::Client as TextractClient;

#[derive(Debug, Clone)]
pub struct TextractAnalyzer {
    client: TextractClient,
}

impl TextractAnalyzer {
    pub fn new(client: TextractClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentAnalyzer for TextractAnalyzer {
    async fn analyze_id(&self, document: Vec<u8>) -> Result<Vec<IdentityDocument>> {
        let output = self
            .client
            .analyze_id()
            .document_pages(types::Document::builder().bytes(Blob::new(document)).build())
            .send()
            .await
            .map_err(|e| TextractError::service("AnalyzeID", e))?;

        Ok(output
            .identity_documents()
            .iter()
            .enumerate()
            .map(|(position, doc)| convert_identity_document(position as i32 + 1, doc))
            .collect())
    }

    async fn start_job(&self, kind: JobKind, location: &DocumentLocation) -> Result<String> {
        let document_location = types::DocumentLocation::builder()
            .s3_object(
                types::S3Object::builder()
                    .bucket(&location.bucket)
                    .name(&location.key)
                    .build(),
            )
            .build();

        let job_id = match kind {
            JobKind::TextDetection => self
                .client
                .start_document_text_detection()
                .document_location(document_location)
                .send()
                .await
                .map_err(|e| TextractError::service(kind.start_operation(), e))?
                .job_id()
                .map(str::to_string),
            JobKind::TableAnalysis => self
                .client
                .start_document_analysis()
                .document_location(document_location)
                .feature_types(types::FeatureType::Tables)
                .send()
                .await
                .map_err(|e| TextractError::service(kind.start_operation(), e))?
                .job_id()
                .map(str::to_string),
        };

        job_id.ok_or_else(|| TextractError::MissingResponseField {
            operation: kind.start_operation().to_string(),
            field: "JobId".to_string(),
        })
    }

    async fn get_job_page(
        &self,
        kind: JobKind,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<ResultPage> {
        let operation = kind.get_operation();
        let next_token = next_token.map(str::to_string);

        match kind {
            JobKind::TextDetection => {
                let output = self
                    .client
                    .get_document_text_detection()
                    .job_id(job_id)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map_err(|e| TextractError::service(operation, e))?;
                convert_page(
                    operation,
                    output.job_status(),
                    output.status_message(),
                    output.blocks(),
                    output.next_token(),
                )
            }
            JobKind::TableAnalysis => {
                let output = self
                    .client
                    .get_document_analysis()
                    .job_id(job_id)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map_err(|e| TextractError::service(operation, e))?;
                convert_page(
                    operation,
                    output.job_status(),
                    output.status_message(),
                    output.blocks(),
                    output.next_token(),
                )
            }
        }
    }
}

fn convert_page(
    operation: &str,
    status: Option<&types::JobStatus>,
    status_message: Option<&str>,
    blocks: &[types::Block],
    next_token: Option<&str>,
) -> Result<ResultPage> {
    let status = status.ok_or_else(|| TextractError::MissingResponseField {
        operation: operation.to_string(),
        field: "JobStatus".to_string(),
    })?;

    Ok(ResultPage {
        status: JobStatus::parse(status.as_str()),
        status_message: status_message.map(str::to_string),
        blocks: blocks.iter().map(convert_block).collect(),
        next_token: next_token.map(str::to_string),
    })
}

fn convert_block(block: &types::Block) -> Block {
    let child_ids = block
        .relationships()
        .iter()
        .filter(|rel| rel.r#type() == Some(&types::RelationshipType::Child))
        .flat_map(|rel| rel.ids().iter().cloned())
        .collect();

    Block {
        id: block.id().unwrap_or_default().to_string(),
        block_type: block
            .block_type()
            .map(|t| BlockType::parse(t.as_str()))
            .unwrap_or_else(|| BlockType::Other(String::new())),
        text: block.text().map(str::to_string),
        confidence: block.confidence(),
        page: block.page(),
        row_index: block.row_index(),
        column_index: block.column_index(),
        child_ids,
    }
}

fn convert_identity_document(
    document_index: i32,
    document: &types::IdentityDocument,
) -> IdentityDocument {
    IdentityDocument {
        document_index,
        fields: document
            .identity_document_fields()
            .iter()
            .map(|field| IdentityField {
                field_type: field
                    .r#type()
                    .map(|d| d.text().to_string())
                    .unwrap_or_default(),
                value: field
                    .value_detection()
                    .map(|d| d.text().to_string())
                    .unwrap_or_default(),
                confidence: field.value_detection().and_then(|d| d.confidence()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_block_keeps_only_child_relationships() {
        let block = types::Block::builder()
            .id("cell-1")
            .block_type(types::BlockType::Cell)
            .row_index(2)
            .column_index(1)
            .relationships(
                types::Relationship::builder()
                    .r#type(types::RelationshipType::Child)
                    .ids("w1")
                    .ids("w2")
                    .build(),
            )
            .relationships(
                types::Relationship::builder()
                    .r#type(types::RelationshipType::MergedCell)
                    .ids("m1")
                    .build(),
            )
            .build();

        let converted = convert_block(&block);

        assert_eq!(converted.id, "cell-1");
        assert_eq!(converted.block_type, BlockType::Cell);
        assert_eq!(converted.row_index, Some(2));
        assert_eq!(converted.child_ids, vec!["w1", "w2"]);
    }

    #[test]
    fn test_convert_page_requires_status() {
        let err = convert_page("GetDocumentAnalysis", None, None, &[], None).unwrap_err();
        assert!(matches!(err, TextractError::MissingResponseField { ref field, .. } if field == "JobStatus"));

        let page = convert_page(
            "GetDocumentAnalysis",
            Some(&types::JobStatus::InProgress),
            None,
            &[],
            Some("tok"),
        )
        .unwrap();
        assert_eq!(page.status, JobStatus::InProgress);
        assert_eq!(page.next_token.as_deref(), Some("tok"));
    }
}
