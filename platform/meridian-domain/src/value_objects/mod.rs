pub mod date_window;
pub mod price_column;
pub mod price_row;
