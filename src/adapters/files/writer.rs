//! CSV file sink
//!
//! Writes one CSV file per table into the output directory, plus a generated
//! data dictionary (`README.md`) describing every table and column.

use crate::adapters::files::dictionary;
use crate::adapters::sink::traits::{TableSink, WriteReport};
use crate::config::schema::FilesConfig;
use crate::domain::tables::TableKind;
use crate::domain::{KarooError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File-based sink producing one CSV per table
pub struct FileSink {
    config: FilesConfig,
}

impl FileSink {
    /// Create a new file sink
    pub fn new(config: FilesConfig) -> Self {
        Self { config }
    }

    fn table_path(&self, kind: TableKind) -> PathBuf {
        Path::new(&self.config.output_dir).join(kind.file_name())
    }
}

#[async_trait]
impl TableSink for FileSink {
    fn name(&self) -> &str {
        "files"
    }

    async fn prepare(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| {
                KarooError::Io(format!(
                    "Failed to create output directory {}: {}",
                    self.config.output_dir, e
                ))
            })?;

        tracing::info!(output_dir = %self.config.output_dir, "Output directory ready");
        Ok(())
    }

    async fn write_table(&self, kind: TableKind, rows: &[Value]) -> Result<WriteReport> {
        let csv = render_csv(kind, rows);
        let path = self.table_path(kind);

        tokio::fs::write(&path, csv).await.map_err(|e| {
            KarooError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            table = %kind,
            path = %path.display(),
            rows = rows.len(),
            "Wrote CSV file"
        );

        Ok(WriteReport::success(kind, rows.len()))
    }

    async fn finalize(&self) -> Result<()> {
        if !self.config.write_dictionary {
            return Ok(());
        }

        let path = Path::new(&self.config.output_dir).join("README.md");
        tokio::fs::write(&path, dictionary::render_dictionary())
            .await
            .map_err(|e| {
                KarooError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;

        tracing::info!(path = %path.display(), "Wrote data dictionary");
        Ok(())
    }
}

/// Render a whole table as CSV text, header row first
///
/// Column order follows the table metadata, not the JSON key order, so the
/// files are stable across runs.
fn render_csv(kind: TableKind, rows: &[Value]) -> String {
    let columns = kind.columns();
    let mut out = String::with_capacity(64 * (rows.len() + 1));

    let header: Vec<&str> = columns.iter().map(|c| c.name).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        let mut first = true;
        for column in columns {
            if !first {
                out.push(',');
            }
            first = false;

            let value = row.get(column.name).unwrap_or(&Value::Null);
            out.push_str(&escape_field(&field_text(value)));
        }
        out.push('\n');
    }

    out
}

/// Convert a JSON value to its CSV cell text
///
/// Nulls become empty cells; everything else uses its natural text form
/// without JSON quoting.
fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Quote a field per RFC 4180
///
/// Fields containing a comma, double quote, CR or LF are wrapped in double
/// quotes with embedded quotes doubled. Everything else passes through.
fn escape_field(field: &str) -> String {
    if field.contains(['"', ',', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_field_plain() {
        assert_eq!(escape_field("FAC0001"), "FAC0001");
        assert_eq!(escape_field("12.5"), "12.5");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn test_escape_field_comma() {
        assert_eq!(
            escape_field("Mthatha Clinic, Annex"),
            "\"Mthatha Clinic, Annex\""
        );
    }

    #[test]
    fn test_escape_field_quote_doubled() {
        assert_eq!(escape_field("the \"main\" site"), "\"the \"\"main\"\" site\"");
    }

    #[test]
    fn test_escape_field_newline() {
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
        assert_eq!(escape_field("line1\r\nline2"), "\"line1\r\nline2\"");
    }

    #[test]
    fn test_field_text_null_is_empty() {
        assert_eq!(field_text(&Value::Null), "");
    }

    #[test]
    fn test_field_text_scalars() {
        assert_eq!(field_text(&json!(true)), "true");
        assert_eq!(field_text(&json!(42)), "42");
        assert_eq!(field_text(&json!(12.75)), "12.75");
        assert_eq!(field_text(&json!("Gauteng")), "Gauteng");
    }

    #[test]
    fn test_render_csv_header_matches_columns() {
        let csv = render_csv(TableKind::Calendar, &[]);
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("dt,dow,week,month,"));
        assert_eq!(
            header.split(',').count(),
            TableKind::Calendar.columns().len()
        );
    }

    #[test]
    fn test_render_csv_rows_follow_column_order() {
        let rows = vec![json!({
            "dt": "2024-04-27",
            "dow": 6,
            "week": 17,
            "month": 4,
            "quarter": 2,
            "year": 2024,
            "is_weekend": true,
            "is_public_holiday": true,
            "is_payday": false,
            "school_term": 2,
            "season": "Autumn"
        })];

        let csv = render_csv(TableKind::Calendar, &rows);
        let mut lines = csv.lines();
        lines.next();
        let row = lines.next().unwrap();
        assert_eq!(row, "2024-04-27,6,17,4,2,2024,true,true,false,2,Autumn");
    }

    #[test]
    fn test_render_csv_missing_key_is_empty_cell() {
        let rows = vec![json!({"dt": "2024-01-01"})];
        let csv = render_csv(TableKind::Calendar, &rows);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("2024-01-01,,"));
    }
}
