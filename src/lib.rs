//! sheetmap - typed records to and from spreadsheet worksheets
//!
//! Reads a worksheet's rows into a `Vec<T>` and writes a `&[T]` back out as
//! a worksheet. Columns are matched to record fields by header text.
//!
//! # Features
//!
//! - Field list declared once per type ([`record!`] or [`schema::Schema::builder`])
//! - Per-field column name override
//! - Header row found wherever the sheet's data starts
//! - Best-effort cell conversion: blank or unparseable cells keep the field's default
//! - Integers, floats, decimals, booleans, dates/times, durations, UUIDs, URLs, enums
//! - Reads xlsx/xlsm/xlsb/xls/ods, writes xlsx
//!
//! # Example
//!
//! ```no_run
//! use sheetmap::{ExcelUtil, SheetMapper};
//!
//! sheetmap::record! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Person {
//!         pub name: String => "Name",
//!         pub age: i32 => "Age",
//!         pub email: String => "Email Address",
//!     }
//! }
//!
//! let util = ExcelUtil::new();
//! let people = vec![Person {
//!     name: "Alice".to_string(),
//!     age: 30,
//!     email: "alice@example.com".to_string(),
//! }];
//!
//! util.write(&people, "people.xlsx")?;
//! let read_back: Vec<Person> = util.read("people.xlsx")?;
//! assert_eq!(read_back, people);
//! # Ok::<(), sheetmap::SheetMapError>(())
//! ```

pub mod cli;
pub mod convert;
pub mod error;
pub mod excel;
pub mod registrar;
pub mod schema;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use error::{SheetMapError, SheetMapResult};
pub use registrar::Registrar;
pub use schema::{Record, Schema, SchemaCache};
pub use service::{ExcelUtil, SheetMapper};
pub use types::{SheetRow, DEFAULT_SHEET_NAME};
