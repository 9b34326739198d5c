//! Report tables and their text, CSV and JSON renderings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyticsError, Result};

/// Output format options for rendered reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON objects keyed by column name
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

/// A record type that can be laid out as one row of a report
///
/// The serialized field names must match `COLUMNS` so JSON output lines up
/// with the text and CSV headers.
pub trait ReportRow: Serialize {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// A titled table ready to render
///
/// `rows` holds the display strings used by text and CSV output; `records`
/// holds the same rows as typed JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub records: Vec<Value>,
}

impl ReportTable {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn from_records<'r, R>(
        title: impl Into<String>,
        records: impl IntoIterator<Item = &'r R>,
    ) -> Result<Self>
    where
        R: ReportRow + 'r,
    {
        let mut table = Self::new(title, R::COLUMNS);
        for record in records {
            table.push_typed_row(record.cells(), serde_json::to_value(record)?);
        }
        Ok(table)
    }

    /// Append a row whose JSON form is its cells as strings
    pub fn push_row(&mut self, row: Vec<String>) {
        let object: Map<String, Value> = self
            .columns
            .iter()
            .cloned()
            .zip(row.iter().cloned().map(Value::String))
            .collect();
        self.push_typed_row(row, Value::Object(object));
    }

    pub fn push_typed_row(&mut self, row: Vec<String>, record: Value) {
        self.rows.push(row);
        self.records.push(record);
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render_text()),
            OutputFormat::Csv => self.render_csv(),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&self.to_json())?),
        }
    }

    fn render_text(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&format_line(&self.columns, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&format_line(&rule, &widths));
        for row in &self.rows {
            out.push_str(&format_line(row, &widths));
        }
        if self.rows.is_empty() {
            out.push_str("(no rows)\n");
        }
        out
    }

    fn render_csv(&self) -> Result<String> {
        let csv_error = |source: csv::Error| AnalyticsError::Csv {
            table: self.title.clone(),
            source,
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns).map_err(csv_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_error)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv_error(csv::Error::from(e.into_error())))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// `{"title": .., "rows": [{column: value, ..}, ..]}`
    pub fn to_json(&self) -> Value {
        let mut report = Map::new();
        report.insert("title".to_string(), Value::String(self.title.clone()));
        report.insert("rows".to_string(), Value::Array(self.records.clone()));
        Value::Object(report)
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let mut line = padded.join("  ").trim_end().to_string();
    line.push('\n');
    line
}

/// Render several reports as one document
///
/// Text and CSV reports are separated by a blank line, each preceded by its
/// title; JSON output is a single array of report objects.
pub fn render_all(tables: &[ReportTable], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let reports: Vec<Value> = tables.iter().map(ReportTable::to_json).collect();
            Ok(serde_json::to_string_pretty(&reports)?)
        }
        OutputFormat::Csv => {
            let mut sections = Vec::with_capacity(tables.len());
            for table in tables {
                sections.push(format!("# {}\n{}", table.title, table.render_csv()?));
            }
            Ok(sections.join("\n"))
        }
        OutputFormat::Table => Ok(tables
            .iter()
            .map(ReportTable::render_text)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
