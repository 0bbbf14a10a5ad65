use serde::Serialize;

/// Worksheet read from and written to when the caller names none
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// One worksheet row as cell text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    /// 1-based row number in the worksheet
    pub number: u32,
    /// Cell text indexed by zero-based column (A = 0); empty cells are ""
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn new(number: u32, cells: Vec<String>) -> Self {
        Self { number, cells }
    }

    /// Text of the cell at `column`, "" past the last cell
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// True when no cell in the row holds anything
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }
}
