//! Type-directed cell value conversion
//!
//! Every value that crosses the worksheet boundary does so as text:
//! - Read: cell text → [`FromCell::from_cell`] → [`Conversion`]
//! - Write: value → [`ToCell::to_cell`] → cell text (`None` = blank cell)
//!
//! A failed parse is not an error. The converter answers
//! [`Conversion::Skip`] and the row mapper leaves the field at its default.

mod enums;
mod primitives;
mod temporal;

pub use temporal::{format_duration, parse_duration};

/// Why a cell did not produce a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only text
    Blank,
    /// Text could not be parsed as the target type
    Malformed,
}

/// Outcome of converting one cell's text into a typed value
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion<T> {
    Value(T),
    Skip(SkipReason),
}

impl<T> Conversion<T> {
    /// Build a conversion from a parse result, discarding the parse error
    pub fn from_result<E>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Conversion::Value(value),
            Err(_) => Conversion::Skip(SkipReason::Malformed),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Conversion<U> {
        match self {
            Conversion::Value(value) => Conversion::Value(f(value)),
            Conversion::Skip(reason) => Conversion::Skip(reason),
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Conversion::Value(value) => Some(value),
            Conversion::Skip(_) => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Conversion::Skip(_))
    }
}

/// Parse a value out of a cell's text
pub trait FromCell: Sized {
    fn from_cell(text: &str) -> Conversion<Self>;
}

/// Render a value as cell text
///
/// `None` means null: the cell is written empty.
pub trait ToCell {
    fn to_cell(&self) -> Option<String>;
}

/// True when the text is empty or whitespace only
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

impl<T: FromCell> FromCell for Option<T> {
    fn from_cell(text: &str) -> Conversion<Self> {
        if is_blank(text) {
            return Conversion::Skip(SkipReason::Blank);
        }
        T::from_cell(text).map(Some)
    }
}

impl<T: ToCell> ToCell for Option<T> {
    fn to_cell(&self) -> Option<String> {
        self.as_ref().and_then(ToCell::to_cell)
    }
}

impl<T: ToCell + ?Sized> ToCell for &T {
    fn to_cell(&self) -> Option<String> {
        (**self).to_cell()
    }
}
