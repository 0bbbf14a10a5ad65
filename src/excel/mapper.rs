//! Row mapping between worksheet rows and typed records
//!
//! Pure transformation, no file access:
//! - Read: header row → [`ColumnIndexMap`], data rows → records
//! - Write: schema → header row, records → data rows

use crate::convert::{is_blank, Conversion};
use crate::schema::Schema;
use crate::types::SheetRow;
use std::collections::HashMap;
use tracing::trace;

/// Header text → zero-based column position for one worksheet
///
/// Built by scanning the header row left to right. When a header text
/// occurs more than once only its first position is kept. Blank header
/// cells are not addressable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndexMap {
    positions: HashMap<String, usize>,
    ordered: Vec<(String, usize)>,
}

impl ColumnIndexMap {
    pub fn from_header(header: &SheetRow) -> Self {
        let mut map = Self::default();

        for (column, text) in header.cells.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            if map.positions.contains_key(text) {
                trace!(
                    header = %text,
                    column,
                    "duplicate header ignored, first occurrence wins"
                );
                continue;
            }
            map.positions.insert(text.clone(), column);
            map.ordered.push((text.clone(), column));
        }

        map
    }

    pub fn get(&self, header: &str) -> Option<usize> {
        self.positions.get(header).copied()
    }

    /// Addressable headers with their positions, left to right
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.ordered.iter().map(|(name, column)| (name.as_str(), *column))
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Maps rows of one worksheet to and from records described by a schema
pub struct RowMapper<'a, T> {
    schema: &'a Schema<T>,
}

impl<'a, T> RowMapper<'a, T> {
    pub fn new(schema: &'a Schema<T>) -> Self {
        Self { schema }
    }

    /// Map the used rows of a worksheet to records
    ///
    /// The first non-empty row is the header; every later non-empty row
    /// becomes one record, in order. No rows at all gives no records.
    pub fn read_rows<I>(&self, rows: I) -> Vec<T>
    where
        T: Default,
        I: IntoIterator<Item = SheetRow>,
    {
        let mut used = rows.into_iter().filter(|row| !row.is_empty());

        let Some(header) = used.next() else {
            return Vec::new();
        };
        let columns = ColumnIndexMap::from_header(&header);

        used.map(|row| self.read_row(&columns, &row)).collect()
    }

    /// Build one record from a data row
    ///
    /// Fields whose column is missing, whose cell is blank, or whose text
    /// does not convert keep their default value.
    pub fn read_row(&self, columns: &ColumnIndexMap, row: &SheetRow) -> T
    where
        T: Default,
    {
        let mut record = T::default();

        for field in self.schema.fields() {
            let Some(column) = columns.get(field.column()) else {
                continue;
            };
            let text = row.cell(column);
            if is_blank(text) {
                continue;
            }
            if let Conversion::Skip(reason) = field.assign(&mut record, text) {
                trace!(
                    row = row.number,
                    column = field.column(),
                    target = field.type_name(),
                    ?reason,
                    "cell left at default"
                );
            }
        }

        record
    }

    /// Header row: one column name per field, in field order
    pub fn header(&self) -> Vec<String> {
        self.schema
            .columns()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Data row for one record; null values render as ""
    pub fn render_row(&self, record: &T) -> Vec<String> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.render(record).unwrap_or_default())
            .collect()
    }
}
