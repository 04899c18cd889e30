use std::fmt::Write;

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::{
    binder::{self, Bindings},
    error::Result,
    expr::{Expr, Ordered},
    ident::TableRef,
    value::Value,
    writer::{FormatContext, FormatWriter},
};

/// One SELECT statement.
///
/// A statement is immutable: [`Statement::bind`] returns a new statement and
/// the original stays usable as a template. Statements can be shared between
/// threads freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub(crate) select: Vec<Expr>,
    pub(crate) from: TableRef,
    pub(crate) filter: Option<Expr>,
    pub(crate) order_by: Vec<Ordered>,
}

impl Statement {
    pub fn select(&self) -> &[Expr] {
        &self.select
    }

    pub fn table(&self) -> &TableRef {
        &self.from
    }

    pub fn filter(&self) -> Option<&Expr> {
        self.filter.as_ref()
    }

    pub fn order_by(&self) -> &[Ordered] {
        &self.order_by
    }

    /// Names of the placeholders still unresolved, in first-seen order.
    pub fn placeholders(&self) -> IndexSet<SmolStr> {
        let mut names = IndexSet::new();
        let mut collect = |name: &SmolStr| {
            names.insert(name.clone());
        };
        for expr in &self.select {
            expr.visit_placeholders(&mut collect);
        }
        if let Some(ref filter) = self.filter {
            filter.visit_placeholders(&mut collect);
        }
        for ordered in &self.order_by {
            ordered.expr.visit_placeholders(&mut collect);
        }
        names
    }

    /// Whether the statement has no unresolved placeholder and can be rendered.
    pub fn is_closed(&self) -> bool {
        self.placeholders().is_empty()
    }

    /// Bind every placeholder named in `bindings`, returning a new statement.
    pub fn bind(&self, bindings: &Bindings) -> Statement {
        binder::bind(self, bindings)
    }

    /// Bind a single placeholder.
    pub fn set<N, V>(&self, name: N, value: V) -> Statement
    where
        N: Into<SmolStr>,
        V: Into<Value>,
    {
        self.bind(&Bindings::new().set(name, value))
    }

    /// Render the statement, failing on the first unbound placeholder.
    pub fn to_sql(&self) -> Result<String> {
        render(self)
    }
}

/// Render `statement` to SQL text.
pub fn render(statement: &Statement) -> Result<String> {
    let size_hint = 64;
    let mut str = String::with_capacity(size_hint);
    let mut context = FormatContext::new(&mut str);
    if let Err(err) = statement.format_writer(&mut context) {
        tracing::debug!(error = %err, "statement render failed");
        return Err(err);
    }
    tracing::trace!(len = str.len(), "statement rendered");
    Ok(str)
}

impl FormatWriter for Statement {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.writer.write_str("SELECT ")?;
        context.write_list(&self.select)?;

        context.writer.write_str(" FROM ")?;
        self.from.format_writer(context)?;

        if let Some(ref filter) = self.filter {
            context.writer.write_str(" WHERE ")?;
            filter.format_writer(context)?;
        }

        if !self.order_by.is_empty() {
            context.writer.write_str(" ORDER BY ")?;
            context.write_list(&self.order_by)?;
        }

        Ok(())
    }
}
