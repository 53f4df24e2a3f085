pub mod price_csv;

pub use price_csv::FilesystemPriceDataRepository;
