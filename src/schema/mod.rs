//! Record schemas: which fields a record has and which column each binds to
//!
//! A record type lists its fields once, in column order, through
//! [`Record::schema`]. Each field carries:
//! - the member name (the Rust field identifier)
//! - the member type name
//! - the column name (an explicit override, or the member name)
//! - a getter rendering the value to cell text
//! - a setter converting cell text into the member
//!
//! Schemas are resolved through a [`SchemaCache`] so the list is built at
//! most once per type.

mod cache;

pub use cache::SchemaCache;

use crate::convert::{Conversion, FromCell, ToCell};
use std::fmt;

/// A type that can be mapped to and from worksheet rows
///
/// Implement by hand with [`Schema::builder`], or declare the struct with
/// [`record!`](crate::record) to get the implementation generated.
pub trait Record: Sized + 'static {
    fn schema() -> Schema<Self>;
}

type Render<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;
type Assign<T> = Box<dyn Fn(&mut T, &str) -> Conversion<()> + Send + Sync>;

/// One member of a record and the column it binds to
pub struct Field<T> {
    member: &'static str,
    type_name: &'static str,
    column: String,
    render: Render<T>,
    assign: Assign<T>,
}

impl<T> Field<T> {
    pub fn member(&self) -> &'static str {
        self.member
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Current value as cell text, `None` when the value is null
    pub fn render(&self, record: &T) -> Option<String> {
        (self.render)(record)
    }

    /// Convert `text` and store it in the member
    ///
    /// On [`Conversion::Skip`] the record is left untouched.
    pub fn assign(&self, record: &mut T, text: &str) -> Conversion<()> {
        (self.assign)(record, text)
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("member", &self.member)
            .field("type_name", &self.type_name)
            .field("column", &self.column)
            .finish()
    }
}

/// Ordered field list of a record type
pub struct Schema<T> {
    fields: Vec<Field<T>>,
}

impl<T: 'static> Schema<T> {
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder { fields: Vec::new() }
    }
}

impl<T> Schema<T> {
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Column names in field order, as written to the header row
    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(Field::column).collect()
    }

    pub fn field(&self, member: &str) -> Option<&Field<T>> {
        self.fields.iter().find(|field| field.member == member)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// Builder listing a record's fields in column order
pub struct SchemaBuilder<T> {
    fields: Vec<Field<T>>,
}

impl<T: 'static> SchemaBuilder<T> {
    /// Add a field bound to the column named after the member
    pub fn field<V>(self, member: &'static str, get: fn(&T) -> &V, set: fn(&mut T, V)) -> Self
    where
        V: FromCell + ToCell + 'static,
    {
        self.field_as(member, member, get, set)
    }

    /// Add a field bound to an explicitly named column
    pub fn field_as<V>(
        mut self,
        member: &'static str,
        column: impl Into<String>,
        get: fn(&T) -> &V,
        set: fn(&mut T, V),
    ) -> Self
    where
        V: FromCell + ToCell + 'static,
    {
        self.fields.push(Field {
            member,
            type_name: std::any::type_name::<V>(),
            column: column.into(),
            render: Box::new(move |record: &T| get(record).to_cell()),
            assign: Box::new(move |record: &mut T, text: &str| {
                V::from_cell(text).map(|value| set(record, value))
            }),
        });
        self
    }

    pub fn build(self) -> Schema<T> {
        Schema {
            fields: self.fields,
        }
    }
}

/// Declare a struct together with its [`Record`] implementation
///
/// Fields bind to a column named after the field. Append `=> "Header"`
/// to a field to bind it to a different column.
///
/// ```
/// sheetmap::record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct Person {
///         pub name: String,
///         pub age: i32,
///         pub email: String => "Email Address",
///     }
/// }
///
/// use sheetmap::schema::Record;
/// let schema = Person::schema();
/// assert_eq!(schema.columns(), vec!["name", "age", "Email Address"]);
/// ```
#[macro_export]
macro_rules! record {
    (@column $field:ident) => {
        stringify!($field)
    };
    (@column $field:ident, $column:literal) => {
        $column
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $column:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty ),*
        }

        impl $crate::schema::Record for $name {
            fn schema() -> $crate::schema::Schema<Self> {
                $crate::schema::Schema::<Self>::builder()
                    $(
                        .field_as(
                            stringify!($field),
                            $crate::record!(@column $field $(, $column)?),
                            |record: &Self| &record.$field,
                            |record: &mut Self, value: $ty| record.$field = value,
                        )
                    )*
                    .build()
            }
        }
    };
}
