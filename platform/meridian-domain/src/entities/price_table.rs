use crate::value_objects::date_window::DateWindow;
use crate::value_objects::price_column::PriceColumn;
use crate::value_objects::price_row::PriceRow;

/// In-memory table for a single request. `columns` keeps the cleaned header
/// names in file order, dropped columns excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    pub columns: Vec<String>,
    pub rows: Vec<PriceRow>,
}

impl PriceTable {
    pub fn new(columns: Vec<String>, rows: Vec<PriceRow>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, column: PriceColumn) -> bool {
        self.columns
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column.label()))
    }

    pub fn rows_in(&self, window: &DateWindow) -> impl Iterator<Item = &PriceRow> + '_ {
        let window = *window;
        self.rows.iter().filter(move |row| window.contains(row.date))
    }
}
