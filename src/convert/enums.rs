//! Enum conversions

/// Declare a fieldless enum that converts to and from cell text by variant name
///
/// Parsing is case-insensitive and ignores surrounding whitespace; rendering
/// uses the variant name as declared.
///
/// ```
/// sheetmap::cell_enum! {
///     #[derive(Debug, Clone, Copy, Default, PartialEq)]
///     pub enum Status {
///         #[default]
///         Active,
///         Suspended,
///     }
/// }
///
/// use sheetmap::convert::{Conversion, FromCell};
/// assert_eq!(Status::from_cell("SUSPENDED"), Conversion::Value(Status::Suspended));
/// ```
#[macro_export]
macro_rules! cell_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),*
        }

        impl $name {
            /// Every variant in declaration order
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),*];

            /// Variant name as written in cells
            pub fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),*
                }
            }
        }

        impl $crate::convert::FromCell for $name {
            fn from_cell(text: &str) -> $crate::convert::Conversion<Self> {
                let text = text.trim();
                $(
                    if text.eq_ignore_ascii_case(stringify!($variant)) {
                        return $crate::convert::Conversion::Value($name::$variant);
                    }
                )*
                $crate::convert::Conversion::Skip($crate::convert::SkipReason::Malformed)
            }
        }

        impl $crate::convert::ToCell for $name {
            fn to_cell(&self) -> Option<String> {
                Some(self.name().to_string())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::convert::{Conversion, FromCell, SkipReason, ToCell};

    crate::cell_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Priority {
            Low,
            Medium,
            High,
        }
    }

    #[test]
    fn test_enum_parse_is_case_insensitive() {
        assert_eq!(Priority::from_cell("low"), Conversion::Value(Priority::Low));
        assert_eq!(Priority::from_cell("MEDIUM"), Conversion::Value(Priority::Medium));
        assert_eq!(Priority::from_cell(" High "), Conversion::Value(Priority::High));
    }

    #[test]
    fn test_enum_unknown_name_is_skipped() {
        assert_eq!(
            Priority::from_cell("Urgent"),
            Conversion::Skip(SkipReason::Malformed)
        );
        assert!(Priority::from_cell("1").is_skip());
    }

    #[test]
    fn test_enum_renders_variant_name() {
        assert_eq!(Priority::High.to_cell(), Some("High".to_string()));
        assert_eq!(Priority::VARIANTS.len(), 3);
        assert_eq!(Priority::VARIANTS[1].name(), "Medium");
    }
}
