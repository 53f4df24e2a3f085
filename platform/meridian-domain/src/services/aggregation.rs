use crate::value_objects::date_window::DateWindow;
use crate::value_objects::price_column::PriceColumn;
use crate::value_objects::price_row::PriceRow;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    /// First day of the calendar month.
    pub month: NaiveDate,
    pub mean: f64,
    pub samples: usize,
}

impl MonthlyAggregate {
    pub fn label(&self) -> String {
        self.month.format("%Y-%m").to_string()
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    // day 1 exists for every month chrono can represent
    date.with_day(1).unwrap_or(date)
}

/// Arithmetic mean of `column` per calendar month, over rows whose date lies
/// in `window`. Rows without a value for `column` are skipped. Months come
/// back in ascending order; months with no usable rows are absent.
pub fn monthly_mean<'a, I>(
    rows: I,
    column: PriceColumn,
    window: &DateWindow,
) -> Vec<MonthlyAggregate>
where
    I: IntoIterator<Item = &'a PriceRow>,
{
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    for row in rows {
        if !window.contains(row.date) {
            continue;
        }
        let Some(value) = row.value(column) else {
            continue;
        };
        if !value.is_finite() {
            continue;
        }
        let bucket = buckets.entry(month_start(row.date)).or_insert((0.0, 0));
        bucket.0 += value;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(month, (sum, samples))| MonthlyAggregate {
            month,
            mean: sum / samples as f64,
            samples,
        })
        .collect()
}
