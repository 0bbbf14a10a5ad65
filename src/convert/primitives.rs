//! Text, numeric, boolean and identifier conversions

use super::{Conversion, FromCell, SkipReason, ToCell};
use bigdecimal::BigDecimal;
use std::str::FromStr;
use url::Url;
use uuid::Uuid;

impl FromCell for String {
    fn from_cell(text: &str) -> Conversion<Self> {
        Conversion::Value(text.to_string())
    }
}

impl ToCell for String {
    fn to_cell(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ToCell for str {
    fn to_cell(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FromCell for char {
    fn from_cell(text: &str) -> Conversion<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Conversion::Value(c),
            _ => Conversion::Skip(SkipReason::Malformed),
        }
    }
}

impl ToCell for char {
    fn to_cell(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FromCell for bool {
    fn from_cell(text: &str) -> Conversion<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Conversion::Value(true)
        } else if text.eq_ignore_ascii_case("false") {
            Conversion::Value(false)
        } else {
            Conversion::Skip(SkipReason::Malformed)
        }
    }
}

impl ToCell for bool {
    fn to_cell(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Types whose `FromStr`/`Display` pair is already locale-independent
macro_rules! impl_cell_via_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromCell for $ty {
                fn from_cell(text: &str) -> Conversion<Self> {
                    Conversion::from_result(<$ty as FromStr>::from_str(text.trim()))
                }
            }

            impl ToCell for $ty {
                fn to_cell(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_cell_via_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, BigDecimal,
);

impl FromCell for Uuid {
    fn from_cell(text: &str) -> Conversion<Self> {
        Conversion::from_result(Uuid::parse_str(text.trim()))
    }
}

impl ToCell for Uuid {
    fn to_cell(&self) -> Option<String> {
        Some(self.hyphenated().to_string())
    }
}

impl FromCell for Url {
    fn from_cell(text: &str) -> Conversion<Self> {
        Conversion::from_result(Url::parse(text.trim()))
    }
}

impl ToCell for Url {
    fn to_cell(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}
