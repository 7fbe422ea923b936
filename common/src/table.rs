//! Tabular source data
//!
//! Ingredient sheets and single-serve guidelines arrive as a header row
//! followed by rows of cells. Any cell may be missing.

use crate::error::{Error, Result};
use serde::Serialize;

/// Placeholder shown for a missing cell in the rendered table
const MISSING_CELL: &str = "NaN";

/// A header row plus data rows. `None` marks a missing cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Parse CSV text. The first non-blank record is the header.
    ///
    /// Quoted fields may contain commas, line breaks and doubled quotes (`""`).
    /// Empty fields become missing cells; blank lines are skipped.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut records = parse_csv_records(content).into_iter();

        let headers = records
            .next()
            .ok_or_else(|| Error::Parse("CSV has no header row".into()))?;

        let rows = records
            .map(|record| {
                record
                    .into_iter()
                    .map(|field| if field.is_empty() { None } else { Some(field) })
                    .collect()
            })
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, counting ragged rows wider than the header
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.len())
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    /// Present cells, column by column, top to bottom.
    pub fn column_major_cells(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.width()).flat_map(move |column| {
            (0..self.rows.len()).filter_map(move |row| self.cell(row, column))
        })
    }

    /// Column-aligned plain-text rendering (header then rows, no index column)
    pub fn render(&self) -> String {
        let width = self.width();
        if width == 0 {
            return String::new();
        }

        let header_cells: Vec<&str> = (0..width)
            .map(|c| self.headers.get(c).map(String::as_str).unwrap_or(""))
            .collect();
        let body: Vec<Vec<&str>> = (0..self.rows.len())
            .map(|r| {
                (0..width)
                    .map(|c| self.cell(r, c).unwrap_or(MISSING_CELL))
                    .collect()
            })
            .collect();

        let column_widths: Vec<usize> = (0..width)
            .map(|c| {
                std::iter::once(header_cells[c])
                    .chain(body.iter().map(|row| row[c]))
                    .map(|s| s.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        std::iter::once(&header_cells)
            .chain(body.iter())
            .map(|cells| {
                cells
                    .iter()
                    .zip(&column_widths)
                    .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split CSV text into records of fields (double-quote aware)
fn parse_csv_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => record.push(std::mem::take(&mut field)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }

    records
}

/// Blank lines produce no record
fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}
