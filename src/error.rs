use std::path::PathBuf;
use thiserror::Error;

pub type SheetMapResult<T> = Result<T, SheetMapError>;

#[derive(Error, Debug)]
pub enum SheetMapError {
    #[error("Source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to open workbook {}: {message}", path.display())]
    Open { path: PathBuf, message: String },

    #[error("Worksheet '{sheet}' not found (available: {})", available.join(", "))]
    WorksheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Worksheet '{0}' already exists")]
    SheetAlreadyExists(String),

    #[error("Invalid worksheet name '{sheet}': {message}")]
    InvalidSheetName { sheet: String, message: String },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Failed to save workbook {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
