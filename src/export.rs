//! Result table rendering and file export.

use crate::error::{FinderError, Result};
use crate::record::ResultRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Pretty-printed JSON array of records.
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format `{other}` (use csv|json)")),
        }
    }
}

/// `<prefix>_<label>.<ext>` with the label lower-cased and spaces turned
/// into underscores, e.g. `solok_coffee_shop.csv`.
pub fn export_filename(prefix: &str, label: &str, format: ExportFormat) -> String {
    let label = label.trim().to_lowercase().replace(' ', "_");
    format!("{prefix}_{label}.{}", format.extension())
}

/// Write records as UTF-8 CSV. The header row is always written, even for
/// an empty table.
///
/// # Errors
///
/// Returns [`FinderError::Export`] if serialization or writing fails.
pub fn write_csv<W: Write>(records: &[ResultRecord], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(ResultRecord::HEADERS)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`FinderError::Export`] if serialization or writing fails.
pub fn write_json<W: Write>(records: &[ResultRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| FinderError::Export(e.to_string()))
}

/// Serialize records into an in-memory buffer in `format`.
///
/// # Errors
///
/// Returns [`FinderError::Export`] if serialization fails.
pub fn to_bytes(records: &[ResultRecord], format: ExportFormat) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Csv => write_csv(records, &mut buf)?,
        ExportFormat::Json => write_json(records, &mut buf)?,
    }
    Ok(buf)
}

/// Write `records` to `dir/file_name`, creating `dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn export_records(
    records: &[ResultRecord],
    dir: &Path,
    file_name: &str,
    format: ExportFormat,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, to_bytes(records, format)?)?;
    tracing::info!(path = %path.display(), count = records.len(), "results exported");
    Ok(path)
}

/// Render records as a plain-text table for the terminal.
pub fn render_table(records: &[ResultRecord]) -> String {
    let rows: Vec<[&str; 5]> = records
        .iter()
        .map(|r| {
            [
                r.display_name.as_str(),
                r.handle.as_str(),
                r.category_label.as_str(),
                r.source_url.as_str(),
                r.provider_tag.as_str(),
            ]
        })
        .collect();

    let mut widths = ResultRecord::HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: &[&str; 5]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_row(&ResultRecord::HEADERS);
    for row in &rows {
        push_row(row);
    }
    out
}
