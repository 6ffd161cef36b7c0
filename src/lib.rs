pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod genbank;
pub mod record;
pub mod table;
mod utils;

pub use commands::convert::{process_file, RecordSummary};
pub use error::ConvertError;
