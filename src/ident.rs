//! Column and table references, and the handles that produce them.
//!
//! A [`Table`] holds nothing but a table name. Asking it for a column yields a
//! [`ColumnRef`], asking it for itself yields a [`TableRef`]. No schema is
//! consulted, any name is accepted.

use std::fmt::Write;

use smol_str::SmolStr;

use crate::{
    error::Result,
    expr::{Direction, Ordered},
    writer::{FormatContext, FormatWriter},
};

/// `"table"."column"`
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColumnRef {
    table: SmolStr,
    column: SmolStr,
}

impl ColumnRef {
    #[inline]
    pub fn new<T, C>(table: T, column: C) -> Self
    where
        T: Into<SmolStr>,
        C: Into<SmolStr>,
    {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    #[inline]
    pub fn new_static(table: &'static str, column: &'static str) -> Self {
        Self {
            table: SmolStr::new_static(table),
            column: SmolStr::new_static(column),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn asc(self) -> Ordered {
        Ordered::new(self, Direction::Asc)
    }

    pub fn desc(self) -> Ordered {
        Ordered::new(self, Direction::Desc)
    }
}

impl FormatWriter for ColumnRef {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_ident(&self.table)?;
        context.writer.write_char('.')?;
        context.write_ident(&self.column)
    }
}

/// `"table"`
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TableRef(SmolStr);

impl TableRef {
    #[inline]
    pub fn new<T>(name: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(name.into())
    }

    #[inline]
    pub fn new_static(name: &'static str) -> Self {
        Self(SmolStr::new_static(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl FormatWriter for TableRef {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_ident(&self.0)
    }
}

/// A handle on a table, resolving column names into references.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Table {
    name: SmolStr,
}

impl Table {
    pub fn new<T>(name: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference `column` of this table.
    pub fn col<C>(&self, column: C) -> ColumnRef
    where
        C: Into<SmolStr>,
    {
        // SmolStr clones are cheap for short names
        ColumnRef::new(self.name.clone(), column)
    }

    /// Reference the table itself, as used in FROM.
    pub fn table(&self) -> TableRef {
        TableRef(self.name.clone())
    }
}

/// A type that knows the table it maps to.
pub trait TableSchema {
    fn table_ref() -> TableRef;
}

/// A type that knows the columns it maps to.
pub trait ColumnSchema {
    fn columns() -> Vec<ColumnRef>;
}

/// Declare a typed table handle.
///
/// ```
/// sqlcompose::table! {
///     pub struct Users("users") { id, name, kind = "type" }
/// }
///
/// let users = Users;
/// assert_eq!("type", users.kind().column());
/// ```
#[macro_export]
macro_rules! table {
    (@name $col:ident) => { stringify!($col) };
    (@name $col:ident $name:literal) => { $name };
    (
        $(#[$meta:meta])*
        $vis:vis struct $handle:ident($table:literal) {
            $( $col:ident $(= $name:literal)? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $handle;

        impl $handle {
            $(
                pub fn $col(&self) -> $crate::ColumnRef {
                    $crate::ColumnRef::new_static($table, $crate::table!(@name $col $($name)?))
                }
            )*

            pub fn table(&self) -> $crate::TableRef {
                $crate::TableRef::new_static($table)
            }
        }

        impl $crate::TableSchema for $handle {
            fn table_ref() -> $crate::TableRef {
                $crate::TableRef::new_static($table)
            }
        }

        impl $crate::ColumnSchema for $handle {
            fn columns() -> Vec<$crate::ColumnRef> {
                vec![$( $crate::ColumnRef::new_static($table, $crate::table!(@name $col $($name)?)) ),*]
            }
        }
    };
}
