//! Workbook writer - rows of cell text → .xlsx file

use crate::error::{SheetMapError, SheetMapResult};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// A new workbook assembled in memory and saved in one go
///
/// Nothing touches the filesystem until [`WorkbookWriter::save`]; a failed
/// sheet leaves the workbook as it was before the call.
pub struct WorkbookWriter {
    workbook: Workbook,
    sheet_names: Vec<String>,
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookWriter {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            sheet_names: Vec::new(),
        }
    }

    /// Add a worksheet with a header row followed by data rows
    ///
    /// Header lands in row 1, data from row 2, columns from A. Empty cell
    /// text leaves the cell blank.
    pub fn add_sheet<I>(&mut self, name: &str, header: &[String], rows: I) -> SheetMapResult<()>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        // Sheet names are unique regardless of case
        let lowered = name.to_lowercase();
        if self
            .sheet_names
            .iter()
            .any(|existing| existing.to_lowercase() == lowered)
        {
            return Err(SheetMapError::SheetAlreadyExists(name.to_string()));
        }

        let mut worksheet = Worksheet::new();
        worksheet
            .set_name(name)
            .map_err(|e| SheetMapError::InvalidSheetName {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        write_row(&mut worksheet, 0, header)?;
        for (index, row) in rows.into_iter().enumerate() {
            let row_index = u32::try_from(index + 1)
                .map_err(|_| SheetMapError::Export(format!("Too many rows for sheet '{}'", name)))?;
            write_row(&mut worksheet, row_index, &row)?;
        }

        self.workbook.push_worksheet(worksheet);
        self.sheet_names.push(name.to_string());
        Ok(())
    }

    /// Names of the sheets added so far, in order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Save the workbook, creating or overwriting `path`
    pub fn save<P: AsRef<Path>>(mut self, path: P) -> SheetMapResult<()> {
        let path = path.as_ref();
        self.workbook
            .save(path)
            .map_err(|e| SheetMapError::Persistence {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

fn write_row(worksheet: &mut Worksheet, row: u32, cells: &[String]) -> SheetMapResult<()> {
    for (index, text) in cells.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let column = u16::try_from(index)
            .map_err(|_| SheetMapError::Export(format!("Column {} out of range", index + 1)))?;
        worksheet
            .write_string(row, column, text)
            .map_err(|e| SheetMapError::Export(format!("Failed to write cell: {}", e)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_duplicate_sheet_name_rejected() {
        let mut writer = WorkbookWriter::new();
        writer
            .add_sheet("People", &strings(&["Name"]), Vec::new())
            .unwrap();

        let result = writer.add_sheet("people", &strings(&["Name"]), Vec::new());
        assert!(matches!(result, Err(SheetMapError::SheetAlreadyExists(name)) if name == "people"));
        assert_eq!(writer.sheet_names(), &["People".to_string()]);
    }

    #[test]
    fn test_invalid_sheet_name_rejected() {
        let mut writer = WorkbookWriter::new();

        let result = writer.add_sheet("Q1/Q2", &strings(&["Name"]), Vec::new());
        assert!(matches!(result, Err(SheetMapError::InvalidSheetName { .. })));

        let too_long = "x".repeat(32);
        let result = writer.add_sheet(&too_long, &strings(&["Name"]), Vec::new());
        assert!(matches!(result, Err(SheetMapError::InvalidSheetName { .. })));

        assert!(writer.sheet_names().is_empty());
    }

    #[test]
    fn test_save_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.xlsx");

        let mut writer = WorkbookWriter::new();
        writer
            .add_sheet(
                "Sheet1",
                &strings(&["Name", "Age"]),
                vec![strings(&["Ann", "33"]), strings(&["", "40"])],
            )
            .unwrap();
        writer.save(&path).unwrap();

        assert!(path.exists(), "Output file should exist");
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("out.xlsx");

        let mut writer = WorkbookWriter::new();
        writer
            .add_sheet("Sheet1", &strings(&["Name"]), Vec::new())
            .unwrap();

        let result = writer.save(&path);
        assert!(matches!(result, Err(SheetMapError::Persistence { .. })));
    }
}
