//! Table formatting utilities for CLI list and show commands
//!
//! List commands build [`TableRow`]s and hand them to a [`TableFormatter`],
//! which prints aligned TSV with a summary line, or bare ids. Show commands
//! print a two-column details table through [`print_details`].

use chrono::{DateTime, Local, Utc};
use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{first_line, truncate_str};
use crate::cli::OutputFormat;
use crate::core::fields::OrderedFieldMap;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show summary line after table (e.g., "5 node(s) found")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl TableConfig {
    /// Create config optimized for piping (no summary)
    pub fn for_pipe() -> Self {
        Self {
            show_summary: false,
        }
    }
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Server id (cyan)
    Id(u64),
    /// Plain text; only the first line is shown, truncated to the column
    Text(String),
    /// Node type, note category and similar labels
    Type(String),
    /// Timestamp displayed as local date
    Date(Option<DateTime<Utc>>),
    /// Numeric value
    Number(i64),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => format!("{:<width$}", style(id).cyan(), width = width),
            CellValue::Text(s) => {
                let truncated = truncate_str(first_line(s), width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Type(t) => format!("{:<width$}", style(t).magenta(), width = width),
            CellValue::Date(_) | CellValue::Number(_) => {
                format!("{:<width$}", self.raw(), width = width)
            }
            CellValue::Empty => format!("{:<width$}", style("-").dim(), width = width),
        }
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(id) => id.to_string(),
            CellValue::Text(s) => first_line(s).to_string(),
            CellValue::Type(t) => t.clone(),
            CellValue::Date(Some(dt)) => {
                let local: DateTime<Local> = dt.with_timezone(&Local);
                local.format("%Y-%m-%d").to_string()
            }
            CellValue::Date(None) => "-".to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Date(Some(_)) => 10, // "YYYY-MM-DD"
            CellValue::Empty => 1,
            other => other.raw().chars().count(),
        }
    }
}

/// Column definition with header label and width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            config: TableConfig::default(),
        }
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Output rows in the specified format. JSON and YAML are serialized by
    /// the caller from the entities themselves.
    pub fn output<I>(&self, rows: I, format: OutputFormat)
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();

        match format {
            OutputFormat::Id => self.output_ids(&rows),
            _ => self.output_tsv(&rows),
        }
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                // +2 leaves room for the truncation marker
                col.header.len().max(max_content.saturating_add(2)).min(col.width)
            })
            .collect()
    }

    fn output_tsv(&self, rows: &[TableRow]) {
        let widths = self.calculate_widths(rows);

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = *w))
            .collect();
        println!("{}", header.join(" "));

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        println!("{}", "-".repeat(total_width));

        for row in rows {
            let parts: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*w),
                    None => format!("{:<width$}", "-", width = *w),
                })
                .collect();
            println!("{}", parts.join(" "));
        }

        if self.config.show_summary {
            println!();
            println!("{} {}(s) found.", style(rows.len()).cyan(), self.entity_name);
        }
    }

    fn output_ids(&self, rows: &[TableRow]) {
        for row in rows {
            println!("{}", row.id);
        }
    }
}

/// Build a two-column details table ("Field", "Value")
pub fn details_table(rows: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    for (label, value) in rows {
        builder.push_record([label.to_string(), value.clone()]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Print a details table with a bold heading
pub fn print_details(heading: &str, rows: &[(&str, String)]) {
    println!("{}", style(heading).bold());
    println!("{}", details_table(rows));
}

/// Render an ordered field map as a details table, keeping field order
pub fn fields_table(fields: &OrderedFieldMap) -> String {
    let rows: Vec<(&str, String)> = fields.iter().map(|(k, v)| (k, v.to_string())).collect();
    details_table(&rows)
}
