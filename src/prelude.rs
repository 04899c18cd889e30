//! Convenient re-exports: `use sqlcompose::prelude::*;`

pub use crate::{
    Bindings, Builder, ColumnRef, ColumnSchema, Direction, Error, Expr, Fragment,
    Statement, Table, TableRef, TableSchema, Value, bind, compose, expr::BinaryOps, frag, render,
    select,
};
