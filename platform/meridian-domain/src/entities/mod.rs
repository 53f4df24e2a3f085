pub mod price_table;
