pub mod aggregation;
pub mod load_report;
