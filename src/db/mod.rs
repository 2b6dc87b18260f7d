pub mod init;
pub mod utils;
pub mod write;

pub use init::{create_stock_data, ensure_schema};
pub use write::{insert_quote, insert_quotes, store_quotes};
