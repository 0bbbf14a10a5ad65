//! Worksheet access and row mapping
//!
//! - `reader`: spreadsheet file → used rows (calamine)
//! - `writer`: rows → .xlsx file (rust_xlsxwriter)
//! - `mapper`: rows ↔ typed records, no I/O

mod mapper;
mod reader;
mod writer;

pub use mapper::{ColumnIndexMap, RowMapper};
pub use reader::{WorkbookReader, Worksheet};
pub use writer::WorkbookWriter;
