use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use crate::data::normalize::DataPoint;

pub const CSV_HEADER: [&str; 6] = [
    "Tissue",
    "Cell Line",
    "DepMap ID",
    "Disease",
    "Gene Effect",
    "Expression",
];

const MISSING_VALUE: &str = "N/A";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Double-quote a text cell, doubling embedded quotes.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn row(point: &DataPoint) -> [String; 6] {
    [
        quoted(&point.tissue),
        quoted(&point.cell_line),
        quoted(&point.depmap_id),
        quoted(&point.disease),
        point.x.to_string(),
        point
            .expression
            .map_or_else(|| MISSING_VALUE.to_string(), |value| value.to_string()),
    ]
}

/// Write a header and one row per point. Text cells are always quoted,
/// numbers never are, and a missing expression is written as `N/A`.
pub fn write_csv<'a, W: Write>(
    writer: W,
    points: impl IntoIterator<Item = &'a DataPoint>,
) -> Result<usize, ExportError> {
    // Quoting is done per cell above; the writer must not add its own.
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for point in points {
        csv_writer.write_record(row(point))?;
        rows += 1;
    }
    csv_writer.flush()?;

    Ok(rows)
}

pub fn to_csv_string<'a>(
    points: impl IntoIterator<Item = &'a DataPoint>,
) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, points)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `points` to `path`, creating parent directories. Returns the row count.
pub fn export_to_path<'a>(
    path: &Path,
    points: impl IntoIterator<Item = &'a DataPoint>,
) -> Result<usize, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_csv(BufWriter::new(file), points)
}

/// `<date>-<gene>-essentiality.csv` inside `dir`.
pub fn export_file_path(dir: impl AsRef<Path>, gene_id: &str, date_prefix: &str) -> PathBuf {
    let sanitized: String = gene_id
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    dir.as_ref()
        .join(format!("{date_prefix}-{sanitized}-essentiality.csv"))
}
