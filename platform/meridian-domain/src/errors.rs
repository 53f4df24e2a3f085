use std::fmt;

/// Failures surfaced while turning the price file into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The configured file does not exist.
    NotFound(String),
    /// The file exists but could not be read or framed as delimited text.
    Unreadable(String),
    /// A column the operation depends on is absent from the header.
    MissingColumn(String),
    /// Nothing was left after filtering and coercion.
    NoData(String),
    /// A column name that is not one of the numeric price columns.
    InvalidColumn(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {path}"),
            Self::Unreadable(msg) => write!(f, "error reading the file: {msg}"),
            Self::MissingColumn(name) => write!(f, "missing column: {name}"),
            Self::NoData(msg) => write!(f, "no data: {msg}"),
            Self::InvalidColumn(name) => write!(f, "invalid column: {name}"),
        }
    }
}

impl std::error::Error for TableError {}
