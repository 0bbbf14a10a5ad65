//! Typed read/write of whole worksheets

use crate::error::SheetMapResult;
use crate::excel::{RowMapper, WorkbookReader, WorkbookWriter};
use crate::schema::{Record, Schema, SchemaCache};
use crate::types::DEFAULT_SHEET_NAME;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Reading worksheets into typed records and writing records back out
pub trait SheetMapper {
    /// Read every data row of `sheet` into a `T`
    fn read_sheet<T, P>(&self, path: P, sheet: &str) -> SheetMapResult<Vec<T>>
    where
        T: Record + Default,
        P: AsRef<Path>;

    /// Write `records` as sheet `sheet` of a new workbook at `path`
    ///
    /// Empty text is written as a blank cell. A record whose fields all
    /// render empty therefore becomes a blank row, and reading the sheet
    /// back skips it.
    fn write_sheet<T, P>(&self, records: &[T], path: P, sheet: &str) -> SheetMapResult<()>
    where
        T: Record,
        P: AsRef<Path>;

    /// [`SheetMapper::read_sheet`] on "Sheet1"
    fn read<T, P>(&self, path: P) -> SheetMapResult<Vec<T>>
    where
        T: Record + Default,
        P: AsRef<Path>,
    {
        self.read_sheet(path, DEFAULT_SHEET_NAME)
    }

    /// [`SheetMapper::write_sheet`] on "Sheet1"
    fn write<T, P>(&self, records: &[T], path: P) -> SheetMapResult<()>
    where
        T: Record,
        P: AsRef<Path>,
    {
        self.write_sheet(records, path, DEFAULT_SHEET_NAME)
    }
}

/// Default [`SheetMapper`] backed by calamine and rust_xlsxwriter
///
/// ```no_run
/// use sheetmap::{ExcelUtil, SheetMapper};
///
/// sheetmap::record! {
///     #[derive(Debug, Default)]
///     pub struct Person {
///         pub name: String,
///         pub age: i32,
///         pub email: String => "Email Address",
///     }
/// }
///
/// let util = ExcelUtil::new();
/// let people: Vec<Person> = util.read("people.xlsx")?;
/// util.write(&people, "copy.xlsx")?;
/// # Ok::<(), sheetmap::SheetMapError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExcelUtil {
    schemas: Arc<SchemaCache>,
}

impl ExcelUtil {
    /// Instance with its own schema cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Instance resolving schemas through a shared cache
    pub fn with_cache(schemas: Arc<SchemaCache>) -> Self {
        Self { schemas }
    }

    pub fn schemas(&self) -> &Arc<SchemaCache> {
        &self.schemas
    }

    pub fn schema<T: Record>(&self) -> Arc<Schema<T>> {
        self.schemas.resolve::<T>()
    }

    /// Add `records` as sheet `sheet` to a workbook being assembled
    ///
    /// Lets several record lists share one file; [`SheetMapper::write_sheet`]
    /// is this followed by a save.
    pub fn add_sheet<T: Record>(
        &self,
        writer: &mut WorkbookWriter,
        records: &[T],
        sheet: &str,
    ) -> SheetMapResult<()> {
        let schema = self.schema::<T>();
        let mapper = RowMapper::new(&schema);

        writer.add_sheet(
            sheet,
            &mapper.header(),
            records.iter().map(|record| mapper.render_row(record)),
        )
    }
}

impl SheetMapper for ExcelUtil {
    fn read_sheet<T, P>(&self, path: P, sheet: &str) -> SheetMapResult<Vec<T>>
    where
        T: Record + Default,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        debug!(path = %path.display(), sheet, "reading worksheet");

        let schema = self.schema::<T>();
        let mut workbook = WorkbookReader::open(path)?;
        let worksheet = workbook.worksheet(sheet)?;
        let records = RowMapper::new(&schema).read_rows(worksheet.into_rows());

        debug!(path = %path.display(), sheet, records = records.len(), "finished reading worksheet");
        Ok(records)
    }

    fn write_sheet<T, P>(&self, records: &[T], path: P, sheet: &str) -> SheetMapResult<()>
    where
        T: Record,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        debug!(path = %path.display(), sheet, records = records.len(), "writing worksheet");

        let mut writer = WorkbookWriter::new();
        self.add_sheet(&mut writer, records, sheet)?;
        writer.save(path)?;

        debug!(path = %path.display(), sheet, "finished writing worksheet");
        Ok(())
    }
}
