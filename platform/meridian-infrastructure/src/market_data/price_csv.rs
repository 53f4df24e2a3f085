use chrono::{DateTime, NaiveDate, NaiveDateTime};
use meridian_domain::entities::price_table::PriceTable;
use meridian_domain::errors::TableError;
use meridian_domain::repositories::price_data::{Delimiter, PriceDataRepository, PriceSource};
use meridian_domain::services::load_report::LoadReport;
use meridian_domain::value_objects::price_column::PriceColumn;
use meridian_domain::value_objects::price_row::PriceRow;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const DATE_COLUMN: &str = "Date";

#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemPriceDataRepository;

impl FilesystemPriceDataRepository {
    pub fn new() -> Self {
        Self
    }
}

impl PriceDataRepository for FilesystemPriceDataRepository {
    fn exists(&self, source: &PriceSource) -> bool {
        source.path.is_file()
    }

    fn load_table(&self, source: &PriceSource) -> Result<(PriceTable, LoadReport), TableError> {
        load_price_file(&source.path, source.delimiter, &source.drop_columns)
    }
}

pub fn load_price_file(
    path: &Path,
    delimiter: Delimiter,
    drop_columns: &[String],
) -> Result<(PriceTable, LoadReport), TableError> {
    if !path.exists() {
        return Err(TableError::NotFound(path.display().to_string()));
    }
    let bytes = fs::read(path).map_err(|err| {
        TableError::Unreadable(format!("failed to read {}: {err}", path.display()))
    })?;
    parse_price_bytes(&bytes, delimiter, drop_columns)
}

/// Parses delimited price data already held in memory.
pub fn parse_price_bytes(
    bytes: &[u8],
    delimiter: Delimiter,
    drop_columns: &[String],
) -> Result<(PriceTable, LoadReport), TableError> {
    let delimiter = delimiter.byte().unwrap_or_else(|| sniff_delimiter(bytes));
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let raw_headers = reader
        .headers()
        .map_err(|err| TableError::Unreadable(format!("failed to read header: {err}")))?
        .clone();
    let layout = ColumnLayout::from_headers(raw_headers.iter(), drop_columns)?;

    let mut rows: Vec<PriceRow> = Vec::new();
    let mut seen_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut report = LoadReport::default();
    let mut last_seen: Option<NaiveDate> = None;

    for result in reader.records() {
        let record = result.map_err(|err| {
            TableError::Unreadable(format!("failed to parse row: {err}"))
        })?;
        report.rows_read += 1;

        let raw_date = record.get(layout.date_index).unwrap_or("").trim();
        let Some(date) = parse_date(raw_date) else {
            report.record_invalid_date(raw_date);
            continue;
        };

        if let Some(prev) = last_seen {
            if date < prev {
                report.out_of_order += 1;
            }
        }
        last_seen = Some(date);
        if !seen_dates.insert(date) {
            report.duplicates += 1;
        }

        let mut row = PriceRow::new(date);
        for (index, column) in &layout.numeric {
            row.set_value(*column, record.get(*index).and_then(parse_number));
        }
        row.cells = layout
            .kept
            .iter()
            .map(|index| {
                if *index == layout.date_index {
                    date.format("%Y-%m-%d").to_string()
                } else {
                    record.get(*index).unwrap_or("").trim().to_string()
                }
            })
            .collect();
        rows.push(row);
    }

    // stable: rows sharing a date stay in file order
    rows.sort_by_key(|row| row.date);
    report.first_date = rows.first().map(|row| row.date);
    report.last_date = rows.last().map(|row| row.date);

    if report.invalid_date > 0 {
        tracing::debug!(
            invalid_date = report.invalid_date,
            first_invalid = report.first_invalid_date.as_deref().unwrap_or(""),
            "dropped rows with unparsable dates"
        );
    }

    Ok((PriceTable::new(layout.columns, rows), report))
}

struct ColumnLayout {
    columns: Vec<String>,
    /// Record index behind each entry of `columns`.
    kept: Vec<usize>,
    date_index: usize,
    numeric: Vec<(usize, PriceColumn)>,
}

impl ColumnLayout {
    fn from_headers<'a>(
        headers: impl Iterator<Item = &'a str>,
        drop_columns: &[String],
    ) -> Result<Self, TableError> {
        let mut columns = Vec::new();
        let mut kept = Vec::new();
        let mut date_index = None;
        let mut numeric: Vec<(usize, PriceColumn)> = Vec::new();

        for (index, raw) in headers.enumerate() {
            let name = raw.trim_start_matches('\u{feff}').trim();
            if name.is_empty()
                || drop_columns
                    .iter()
                    .any(|dropped| dropped.trim().eq_ignore_ascii_case(name))
            {
                continue;
            }
            if date_index.is_none() && name.eq_ignore_ascii_case(DATE_COLUMN) {
                date_index = Some(index);
            } else if let Ok(column) = PriceColumn::parse(name) {
                if !numeric.iter().any(|(_, seen)| *seen == column) {
                    numeric.push((index, column));
                }
            } else {
                tracing::debug!(column = name, "keeping non-numeric column for display");
            }
            kept.push(index);
            columns.push(name.to_string());
        }

        let date_index =
            date_index.ok_or_else(|| TableError::MissingColumn(DATE_COLUMN.to_string()))?;
        Ok(Self {
            columns,
            kept,
            date_index,
            numeric,
        })
    }
}

/// Picks the delimiter from the header line: tab wins, then a semicolon when
/// no comma is present, otherwise comma.
pub fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes
        .split(|byte| *byte == b'\n')
        .next()
        .unwrap_or_default();
    if header.contains(&b'\t') {
        b'\t'
    } else if header.contains(&b';') && !header.contains(&b',') {
        b';'
    } else {
        b','
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.date());
    }
    None
}

pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
