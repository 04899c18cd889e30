//! Compose SQL statements from clauses, bind named placeholders and render
//! canonical SQL text.
//!
//! ```
//! use sqlcompose::prelude::*;
//!
//! let users = Table::new("users");
//! let template = select([users.col("id"), users.col("name")])
//!     .from(&users)
//!     .where_(users.col("name").equals("%name%"))
//!     .build()?;
//!
//! assert_eq!(
//!     r#"SELECT "users"."id", "users"."name" FROM "users" WHERE "users"."name" = 'Jane'"#,
//!     template.set("name", "Jane").to_sql()?
//! );
//! # Ok::<(), sqlcompose::Error>(())
//! ```

mod binder;
mod builder;
mod error;
pub mod expr;
mod fragment;
mod ident;
pub mod prelude;
mod statement;
mod value;
mod writer;

pub use binder::{Bindings, bind};
pub use builder::{Builder, IntoSelectList, IntoTable};
pub use error::{Clause, Error, Result};
pub use expr::{BinaryOps, Direction, Expr, IntoExpr, IntoOrderList, IntoOrdered, Operator, Ordered};
pub use fragment::Fragment;
pub use ident::{ColumnRef, ColumnSchema, Table, TableRef, TableSchema};
pub use statement::{Statement, render};
pub use value::Value;

/// A quoted reference fragment such as `"users"."id"`, parsed when used.
pub fn frag(value: &str) -> Fragment {
    Fragment::new(value)
}

/// Like [`frag`], for fragments known at compile time.
pub fn frag_static(value: &'static str) -> Fragment {
    Fragment::new_static(value)
}

/// Start a chained statement with its SELECT list.
pub fn select<T>(cols: T) -> Builder
where
    T: IntoSelectList,
{
    let mut builder = Builder::new();
    builder.select(cols);
    builder
}

/// Build a statement from clause declarations made inside `closure`.
pub fn compose<F>(closure: F) -> Result<Statement>
where
    F: FnOnce(&mut Builder),
{
    Builder::compose(closure)
}
