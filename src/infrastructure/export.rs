// Export formatter - JSON and CSV renderings of row-shaped records
use crate::error::{AppError, AppResult};
use anyhow::Context;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(AppError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedBody {
    pub body: Bytes,
    pub content_type: &'static str,
}

/// Render `records` as a JSON array, or as CSV with one column per entry of
/// `columns` in that order. Nested values land in CSV cells as JSON text.
pub fn format_records<T: Serialize>(
    records: &[T],
    columns: &[&str],
    format: ExportFormat,
) -> AppResult<ExportedBody> {
    let body = match format {
        ExportFormat::Json => serde_json::to_vec(records).context("Failed to encode JSON export")?,
        ExportFormat::Csv => write_csv(records, columns)?,
    };

    Ok(ExportedBody {
        body: Bytes::from(body),
        content_type: format.content_type(),
    })
}

fn write_csv<T: Serialize>(records: &[T], columns: &[&str]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;

    for record in records {
        let row = serde_json::to_value(record)?;
        let cells = columns
            .iter()
            .map(|column| render_cell(row.get(*column)))
            .collect::<anyhow::Result<Vec<String>>>()?;
        writer.write_record(&cells)?;
    }

    writer.into_inner().context("Failed to flush CSV export")
}

fn render_cell(value: Option<&Value>) -> anyhow::Result<String> {
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => serde_json::to_string(nested)?,
    })
}
