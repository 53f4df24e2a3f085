use crate::entities::price_table::PriceTable;
use crate::errors::TableError;
use crate::services::load_report::LoadReport;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Sniffed from the header line.
    Auto,
    Comma,
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "comma" | "," => Ok(Self::Comma),
            "tab" | "\\t" => Ok(Self::Tab),
            "semicolon" | ";" => Ok(Self::Semicolon),
            _ => Err(format!("unsupported delimiter: {value}")),
        }
    }

    /// Byte for a concrete delimiter; `Auto` has none until sniffed.
    pub fn byte(self) -> Option<u8> {
        match self {
            Self::Auto => None,
            Self::Comma => Some(b','),
            Self::Tab => Some(b'\t'),
            Self::Semicolon => Some(b';'),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriceSource {
    pub path: PathBuf,
    pub delimiter: Delimiter,
    /// Header names removed after whitespace stripping (case-insensitive).
    pub drop_columns: Vec<String>,
}

pub trait PriceDataRepository {
    fn exists(&self, source: &PriceSource) -> bool;
    fn load_table(&self, source: &PriceSource) -> Result<(PriceTable, LoadReport), TableError>;
}
