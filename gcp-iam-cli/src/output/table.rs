//! Plain-text table rendering for terminal output.
//!
//! Cells may span several lines (e.g. one policy member per line). Column
//! widths are computed from the widest line in each column.

use colored::{Color, Colorize};

struct Column {
    header: String,
    color: Color,
}

/// A titled table with colored columns.
pub struct Table {
    title: String,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn add_column(mut self, header: impl Into<String>, color: Color) -> Self {
        self.columns.push(Column {
            header: header.into(),
            color,
        });
        self
    }

    /// Appends a row. Missing cells render empty; extra cells are ignored.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.columns.len())
            .map(Into::into)
            .collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let separator = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );

        let mut lines = Vec::new();
        lines.push(self.title.bold().to_string());
        lines.push(separator.clone());

        let header_cells: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| {
                pad(&column.header, *width)
                    .magenta()
                    .bold()
                    .to_string()
            })
            .collect();
        lines.push(format!("| {} |", header_cells.join(" | ")));
        lines.push(separator.clone());

        for row in &self.rows {
            let height = row.iter().map(|cell| cell.lines().count().max(1)).max().unwrap_or(1);

            for line_index in 0..height {
                let cells: Vec<String> = row
                    .iter()
                    .zip(&self.columns)
                    .zip(&widths)
                    .map(|((cell, column), width)| {
                        let line = cell.lines().nth(line_index).unwrap_or("");
                        pad(line, *width).color(column.color).to_string()
                    })
                    .collect();
                lines.push(format!("| {} |", cells.join(" | ")));
            }
        }

        if !self.rows.is_empty() {
            lines.push(separator);
        }

        lines.join("\n")
    }

    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                self.rows
                    .iter()
                    .flat_map(|row| row[index].lines())
                    .map(display_width)
                    .chain(std::iter::once(display_width(&column.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(padding))
}
