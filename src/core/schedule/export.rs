// Printable schedule document.
//
// Layout
// - A banner row spanning every column, then a header row: "Time" and one column per day.
// - One row per bucket. A class becomes a single cell spanning its buckets. The rows it
//   covers emit nothing for that column, tracked by a per-column countdown.
// - A row whose cell count disagrees with the matrix is a layout defect and is dropped.
//
// The layout is format agnostic. `render` serializes it as an html table or as csv.

use crate::core::schedule::assignment::{Assignment, DayOfWeek};
use crate::core::schedule::grid::{GridCell, GridMatrix};
use crate::core::schedule::quantizer::TimeBucket;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to format document: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush document buffer: {0}")]
    Buffer(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Html,
    Csv,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Html => "html",
            DocumentFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Html => "text/html; charset=utf-8",
            DocumentFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportHeader {
    pub program_code: String,
    pub program_name: String,
    pub track_label: String,
    pub section_label: String,
}

impl ExportHeader {
    pub fn banner(&self) -> String {
        format!(
            "{} - {} - {}",
            self.program_name, self.track_label, self.section_label
        )
    }

    pub fn file_name(&self, format: DocumentFormat) -> String {
        format!(
            "Horario{}-{}-{}.{}",
            self.program_code,
            self.track_label,
            self.section_label,
            format.extension()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentCell {
    pub column: usize,
    pub text: String,
    pub row_span: usize,
    pub col_span: usize,
}

impl DocumentCell {
    fn plain(column: usize, text: impl Into<String>) -> Self {
        Self {
            column,
            text: text.into(),
            row_span: 1,
            col_span: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowKind {
    Banner,
    Header,
    Slot(TimeBucket),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    pub kind: RowKind,
    pub cells: Vec<DocumentCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDocument {
    pub column_count: usize,
    pub rows: Vec<DocumentRow>,
}

pub fn export_grid(matrix: &GridMatrix, header: &ExportHeader) -> ScheduleDocument {
    let days: Vec<DayOfWeek> = matrix.days().collect();
    let column_count = days.len() + 1;
    let mut rows = vec![
        DocumentRow {
            kind: RowKind::Banner,
            cells: vec![DocumentCell {
                column: 0,
                text: header.banner(),
                row_span: 1,
                col_span: column_count,
            }],
        },
        DocumentRow {
            kind: RowKind::Header,
            cells: std::iter::once(DocumentCell::plain(0, "Time"))
                .chain(
                    days.iter()
                        .enumerate()
                        .map(|(index, day)| DocumentCell::plain(index + 1, day.label())),
                )
                .collect(),
        },
    ];

    let mut rows_remaining = vec![0usize; days.len()];
    for (row, bucket) in matrix.buckets().iter().enumerate() {
        let covered = days
            .iter()
            .filter(|day| {
                matches!(
                    matrix.cell_at(**day, row),
                    Some(GridCell::OccupiedContinuation)
                )
            })
            .count();
        let expected = column_count - covered;

        let mut cells = vec![DocumentCell::plain(0, bucket.label())];
        for (index, day) in days.iter().enumerate() {
            if rows_remaining[index] > 0 {
                rows_remaining[index] -= 1;
                continue;
            }
            match matrix.cell_at(*day, row) {
                Some(GridCell::OccupiedStart {
                    assignment,
                    span_buckets,
                }) => {
                    cells.push(DocumentCell {
                        column: index + 1,
                        text: describe(assignment),
                        row_span: *span_buckets,
                        col_span: 1,
                    });
                    rows_remaining[index] = span_buckets.saturating_sub(1);
                }
                _ => cells.push(DocumentCell::plain(index + 1, "")),
            }
        }

        if cells.len() == expected {
            rows.push(DocumentRow {
                kind: RowKind::Slot(*bucket),
                cells,
            });
        } else {
            warn!(
                bucket = %bucket,
                expected,
                produced = cells.len(),
                "dropping malformed schedule row"
            );
        }
    }

    ScheduleDocument {
        column_count,
        rows,
    }
}

fn describe(assignment: &Assignment) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        assignment.course_name,
        assignment.professor_name,
        assignment.room_code,
        assignment.time_range_label()
    )
}

impl ScheduleDocument {
    pub fn render(&self, format: DocumentFormat) -> Result<Vec<u8>, ExportError> {
        match format {
            DocumentFormat::Html => self.to_html().map(String::into_bytes),
            DocumentFormat::Csv => self.to_csv(),
        }
    }

    fn to_html(&self) -> Result<String, ExportError> {
        let mut out = String::from("<table class=\"schedule\">\n");
        for row in &self.rows {
            let tag = match row.kind {
                RowKind::Slot(_) => "td",
                RowKind::Banner | RowKind::Header => "th",
            };
            out.push_str("<tr>");
            for cell in &row.cells {
                write!(out, "<{tag}")?;
                if cell.row_span > 1 {
                    write!(out, " rowspan=\"{}\"", cell.row_span)?;
                }
                if cell.col_span > 1 {
                    write!(out, " colspan=\"{}\"", cell.col_span)?;
                }
                write!(out, ">{}</{tag}>", escape_html(&cell.text))?;
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</table>\n");
        Ok(out)
    }

    /// Csv has no merged cells: the covered positions are written blank.
    fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_writer(Vec::new());
        for row in &self.rows {
            let mut record = vec![String::new(); self.column_count];
            for cell in &row.cells {
                if let Some(slot) = record.get_mut(cell.column) {
                    *slot = cell.text.replace('\n', " | ");
                }
            }
            writer.write_record(&record)?;
        }
        writer
            .into_inner()
            .map_err(|err| ExportError::Buffer(err.to_string()))
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("<br>"),
            other => escaped.push(other),
        }
    }
    escaped
}
