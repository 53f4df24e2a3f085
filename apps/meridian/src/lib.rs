pub mod error;
pub mod export;
pub mod obs;
pub mod routes;
pub mod server;
pub mod state;
