pub mod config;
pub mod monthly;
pub mod table_view;
