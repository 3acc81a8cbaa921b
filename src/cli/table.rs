use crate::cli::output::current_preferences;
use crate::ledger::{DateFormat, Expense};

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: &'static str,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub const fn new(header: &'static str, alignment: Alignment) -> Self {
        Self {
            header,
            max_width: None,
            alignment,
        }
    }

    pub fn capped(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Widest cell per column, headers included, limited by `max_width`.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(column.header.chars().count(), usize::max);
                column.max_width.map_or(widest, |max| widest.min(max))
            })
            .collect()
    }

    fn render_row(&self, cells: &[&str], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                render_cell(cells.get(idx).copied().unwrap_or(""), *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let headers: Vec<&str> = self.columns.iter().map(|column| column.header).collect();
        let mut lines = vec![self.render_row(&headers, &widths), horizontal_rule(&widths)];
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(self.render_row(&cells, &widths));
        }
        lines.join("\n")
    }
}

/// Builds the `[Date, Category, Amount, Description]` view of a set of records.
pub fn expense_table<'a>(
    records: impl IntoIterator<Item = &'a Expense>,
    date_format: DateFormat,
) -> Table {
    let rows = records
        .into_iter()
        .map(|expense| {
            vec![
                date_format.format(expense.date()),
                expense.category().to_string(),
                expense.amount().to_string(),
                expense.description().to_string(),
            ]
        })
        .collect();
    Table {
        columns: vec![
            TableColumn::new("Date", Alignment::Left),
            TableColumn::new("Category", Alignment::Left).capped(24),
            TableColumn::new("Amount", Alignment::Right),
            TableColumn::new("Description", Alignment::Left).capped(48),
        ],
        rows,
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let ellipsis = if current_preferences().plain_mode {
        '~'
    } else {
        '…'
    };
    let mut out: String = text.chars().take(width - 1).collect();
    out.push(ellipsis);
    out
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = truncate(text, width);
    match alignment {
        Alignment::Left => format!("{:<width$}", fitted, width = width),
        Alignment::Right => format!("{:>width$}", fitted, width = width),
    }
}

pub fn horizontal_rule(widths: &[usize]) -> String {
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let ch = if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    };
    ch.to_string().repeat(total)
}
