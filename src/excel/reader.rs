//! Workbook reader - spreadsheet file → rows of cell text

use crate::error::{SheetMapError, SheetMapResult};
use crate::excel::mapper::ColumnIndexMap;
use crate::types::SheetRow;
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{Duration, NaiveDate, NaiveTime};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Read-only handle on a workbook (xlsx, xlsm, xlsb, xls, ods)
pub struct WorkbookReader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookReader {
    /// Open an existing workbook
    pub fn open<P: AsRef<Path>>(path: P) -> SheetMapResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(SheetMapError::SourceNotFound { path });
        }

        let workbook = open_workbook_auto(&path).map_err(|e| SheetMapError::Open {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(Self { path, workbook })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// Load a worksheet by name
    ///
    /// An exact name match wins; otherwise names are compared
    /// case-insensitively, as spreadsheet applications do.
    pub fn worksheet(&mut self, name: &str) -> SheetMapResult<Worksheet> {
        let available = self.sheet_names();
        let lowered = name.to_lowercase();
        let actual = available
            .iter()
            .find(|sheet| sheet.as_str() == name)
            .or_else(|| available.iter().find(|sheet| sheet.to_lowercase() == lowered))
            .cloned()
            .ok_or_else(|| SheetMapError::WorksheetNotFound {
                sheet: name.to_string(),
                available: available.clone(),
            })?;

        let range = self
            .workbook
            .worksheet_range(&actual)
            .map_err(|e| SheetMapError::Open {
                path: self.path.clone(),
                message: format!("Failed to read worksheet '{}': {}", actual, e),
            })?;

        Ok(Worksheet::from_range(actual, &range))
    }
}

/// The used rows of one worksheet, as cell text
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    rows: Vec<SheetRow>,
}

impl Worksheet {
    fn from_range(name: String, range: &Range<Data>) -> Self {
        let Some((start_row, start_col)) = range.start() else {
            return Self {
                name,
                rows: Vec::new(),
            };
        };

        // Pad so that cell positions are absolute (column A = 0)
        let rows = range
            .rows()
            .enumerate()
            .map(|(offset, cells)| {
                let mut texts = vec![String::new(); start_col as usize];
                texts.extend(cells.iter().map(cell_text));
                SheetRow::new(start_row + offset as u32 + 1, texts)
            })
            .filter(|row| !row.is_empty())
            .collect();

        Self { name, rows }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The header row: first row holding any cell
    pub fn first_used_row(&self) -> Option<&SheetRow> {
        self.rows.first()
    }

    /// Every row holding at least one cell, header included, top to bottom
    pub fn used_rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SheetRow> {
        self.rows
    }

    /// Column Index Map of the header row (empty for an empty sheet)
    pub fn column_index_map(&self) -> ColumnIndexMap {
        self.first_used_row()
            .map(ColumnIndexMap::from_header)
            .unwrap_or_default()
    }
}

/// Text of a cell as the converters expect it
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Serials beyond this many days from the epoch are left as plain numbers
const MAX_SERIAL_DAYS: f64 = 100_000_000.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Render an Excel serial date-time (days since 1899-12-30, 1900 system)
///
/// Serials below 1 carry only a time of day. Serials no date can represent
/// are rendered as the bare number, which no temporal field accepts.
fn excel_serial_to_text(serial: f64) -> String {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_DAYS {
        return serial.to_string();
    }
    let millis = (serial * MILLIS_PER_DAY).round() as i64;

    if (0.0..1.0).contains(&serial) {
        // Rounding may reach midnight of the next day
        let millis = millis.min(86_399_999);
        let seconds = (millis / 1_000) as u32;
        let nanos = ((millis % 1_000) * 1_000_000) as u32;
        return NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos)
            .map(|t| t.format("%H:%M:%S%.f").to_string())
            .unwrap_or_else(|| serial.to_string());
    }

    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.and_hms_opt(0, 0, 0))
        .and_then(|epoch| epoch.checked_add_signed(Duration::try_milliseconds(millis)?))
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        .unwrap_or_else(|| serial.to_string())
}
