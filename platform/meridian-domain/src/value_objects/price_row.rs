use crate::value_objects::price_column::PriceColumn;
use chrono::NaiveDate;

/// One record of the price file with a valid date. Numeric cells that were
/// missing or did not parse to a finite number are `None`; `cells` keeps the
/// text as read, aligned with the table's `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub cells: Vec<String>,
}

impl PriceRow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close: None,
            volume: None,
            cells: Vec::new(),
        }
    }

    pub fn value(&self, column: PriceColumn) -> Option<f64> {
        match column {
            PriceColumn::Open => self.open,
            PriceColumn::High => self.high,
            PriceColumn::Low => self.low,
            PriceColumn::Close => self.close,
            PriceColumn::Volume => self.volume,
        }
    }

    pub fn set_value(&mut self, column: PriceColumn, value: Option<f64>) {
        let slot = match column {
            PriceColumn::Open => &mut self.open,
            PriceColumn::High => &mut self.high,
            PriceColumn::Low => &mut self.low,
            PriceColumn::Close => &mut self.close,
            PriceColumn::Volume => &mut self.volume,
        };
        *slot = value;
    }
}
