pub mod price_data;
