//! Plain text and CSV exports built from already computed records.

pub mod tables;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

pub use tables::{
    competencies_table, employees_table, evaluations_table, nine_box_table, pdis_table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Employees,
    Evaluations,
    NineBox,
    Competencies,
    Pdis,
}

impl ReportKind {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "employees" => Ok(ReportKind::Employees),
            "evaluations" => Ok(ReportKind::Evaluations),
            "nine-box" | "nine_box" => Ok(ReportKind::NineBox),
            "competencies" => Ok(ReportKind::Competencies),
            "pdis" => Ok(ReportKind::Pdis),
            other => Err(AppError::not_found(format!("Report '{other}'"))),
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Employees => "employees",
            ReportKind::Evaluations => "evaluations",
            ReportKind::NineBox => "nine-box",
            ReportKind::Competencies => "competencies",
            ReportKind::Pdis => "pdis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Txt,
}

impl ReportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv; charset=utf-8",
            ReportFormat::Txt => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Txt => "txt",
        }
    }
}

/// A titled grid of already formatted cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(title: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn render(&self, format: ReportFormat) -> AppResult<Vec<u8>> {
        match format {
            ReportFormat::Csv => self.to_csv(),
            ReportFormat::Txt => Ok(self.to_text().into_bytes()),
        }
    }

    pub fn to_csv(&self) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record(&self.headers)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {e}")))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {e}")))?;
        }
        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {e}")))
    }

    /// Column aligned text with a title and a record count.
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(single_line(cell).chars().count());
            }
        }

        let line = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"=".repeat(self.title.chars().count()));
        out.push_str("\n\n");

        if self.rows.is_empty() {
            out.push_str("No records.\n");
            return out;
        }

        out.push_str(&line(self.headers.iter().map(|h| h.to_string()).collect()));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row.iter().map(|c| single_line(c)).collect()));
            out.push('\n');
        }
        out.push_str(&format!("\n{} record(s)\n", self.rows.len()));
        out
    }
}

fn single_line(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}
