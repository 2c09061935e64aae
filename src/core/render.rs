use crate::domain::model::{AnalysisReport, Block, BlockType, IdentityDocument, JobReport};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Csv,
}

pub fn render_report<W: Write>(report: &AnalysisReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Console => render_console(report, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => render_csv(report, out),
    }
}

pub fn render_console<W: Write>(report: &AnalysisReport, out: &mut W) -> Result<()> {
    match report {
        AnalysisReport::Identity { documents } => write_identity_fields(documents, out),
        AnalysisReport::Text(job) => write_text_blocks(job, out),
        AnalysisReport::Table(job) => write_table_grid(&job.blocks, out),
    }
}

fn write_identity_fields<W: Write>(documents: &[IdentityDocument], out: &mut W) -> Result<()> {
    for field in documents.iter().flat_map(|doc| doc.fields.iter()) {
        writeln!(out, "{}: {}", field.field_type, field.value)?;
    }
    Ok(())
}

fn write_text_blocks<W: Write>(job: &JobReport, out: &mut W) -> Result<()> {
    writeln!(out, "Detected text blocks:")?;
    for block in &job.blocks {
        writeln!(
            out,
            "Type {}, Text: {} ({}%)",
            block.block_type,
            block.text.as_deref().unwrap_or_default(),
            whole_percent(block.confidence)
        )?;
    }
    Ok(())
}

/// 以 `| a | b |` 形式印出所有 CELL，column 1 開新的一列
pub fn write_table_grid<W: Write>(blocks: &[Block], out: &mut W) -> Result<()> {
    let by_id = index_blocks(blocks);
    let tables = blocks.iter().filter(|b| b.block_type == BlockType::Table).count();
    let cells: Vec<&Block> = blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Cell)
        .collect();

    writeln!(out, "Found {} tables and {} cells", tables, cells.len())?;

    for cell in &cells {
        if cell.column_index == Some(1) {
            writeln!(out)?;
            write!(out, "| ")?;
        }
        for child_id in &cell.child_ids {
            let text = by_id
                .get(child_id.as_str())
                .and_then(|child| child.text.as_deref())
                .unwrap_or_default();
            write!(out, "{} ", text)?;
        }
        write!(out, "| ")?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn cell_text(cell: &Block, by_id: &HashMap<&str, &Block>) -> String {
    cell.child_ids
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).and_then(|child| child.text.as_deref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn index_blocks(blocks: &[Block]) -> HashMap<&str, &Block> {
    blocks.iter().map(|b| (b.id.as_str(), b)).collect()
}

pub fn render_csv<W: Write>(report: &AnalysisReport, out: &mut W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    match report {
        AnalysisReport::Identity { documents } => {
            writer.write_record(["document", "field", "value", "confidence"])?;
            for doc in documents {
                for field in &doc.fields {
                    writer.write_record([
                        doc.document_index.to_string(),
                        field.field_type.clone(),
                        field.value.clone(),
                        format_confidence(field.confidence),
                    ])?;
                }
            }
        }
        AnalysisReport::Text(job) => {
            writer.write_record(["page", "block_type", "text", "confidence"])?;
            for block in &job.blocks {
                writer.write_record([
                    block.page.map(|p| p.to_string()).unwrap_or_default(),
                    block.block_type.to_string(),
                    block.text.clone().unwrap_or_default(),
                    format_confidence(block.confidence),
                ])?;
            }
        }
        AnalysisReport::Table(job) => {
            let by_id = index_blocks(&job.blocks);
            writer.write_record(["table", "row", "column", "text"])?;

            let tables = job.blocks.iter().filter(|b| b.block_type == BlockType::Table);
            for (table_number, table) in tables.enumerate() {
                let mut cells: Vec<&Block> = table
                    .child_ids
                    .iter()
                    .filter_map(|id| by_id.get(id.as_str()).copied())
                    .filter(|b| b.block_type == BlockType::Cell)
                    .collect();
                cells.sort_by_key(|c| (c.row_index.unwrap_or(0), c.column_index.unwrap_or(0)));

                for cell in cells {
                    writer.write_record([
                        (table_number + 1).to_string(),
                        cell.row_index.unwrap_or_default().to_string(),
                        cell.column_index.unwrap_or_default().to_string(),
                        cell_text(cell, &by_id),
                    ])?;
                }
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// 四捨五入到整數 (0.5 進位)，沒有信心值時留空
fn whole_percent(confidence: Option<f32>) -> String {
    confidence
        .map(|c| format!("{:.0}", c.round()))
        .unwrap_or_default()
}

fn format_confidence(confidence: Option<f32>) -> String {
    confidence.map(|c| format!("{:.2}", c)).unwrap_or_default()
}
