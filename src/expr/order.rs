use std::fmt::Write;

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, IntoExpr};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// An ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordered {
    pub(crate) expr: Expr,
    pub(crate) direction: Direction,
}

impl Ordered {
    pub fn new<E>(expr: E, direction: Direction) -> Self
    where
        E: Into<Expr>,
    {
        Self {
            expr: expr.into(),
            direction,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl FormatWriter for Ordered {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.expr.format_writer(context)?;
        // ascending is the default and never written
        if let Direction::Desc = self.direction {
            context.writer.write_str(" DESC")?;
        }
        Ok(())
    }
}

/// Conversion into an ORDER BY item, fallible for unparsed fragments.
pub trait IntoOrdered {
    fn into_ordered(self) -> Result<Ordered>;
}

impl IntoOrdered for Ordered {
    fn into_ordered(self) -> Result<Ordered> {
        Ok(self)
    }
}

impl<E> IntoOrdered for E
where
    E: IntoExpr,
{
    fn into_ordered(self) -> Result<Ordered> {
        Ok(Ordered::new(self.into_expr()?, Direction::Asc))
    }
}

impl<E> IntoOrdered for (E, Direction)
where
    E: IntoExpr,
{
    fn into_ordered(self) -> Result<Ordered> {
        Ok(Ordered::new(self.0.into_expr()?, self.1))
    }
}

/// Conversion into a list of ORDER BY items.
pub trait IntoOrderList {
    fn into_order_list(self) -> Result<Vec<Ordered>>;
}

impl<T> IntoOrderList for T
where
    T: IntoOrdered,
{
    fn into_order_list(self) -> Result<Vec<Ordered>> {
        Ok(vec![self.into_ordered()?])
    }
}

impl<T, const N: usize> IntoOrderList for [T; N]
where
    T: IntoOrdered,
{
    fn into_order_list(self) -> Result<Vec<Ordered>> {
        self.into_iter().map(IntoOrdered::into_ordered).collect()
    }
}

impl<T> IntoOrderList for Vec<T>
where
    T: IntoOrdered,
{
    fn into_order_list(self) -> Result<Vec<Ordered>> {
        self.into_iter().map(IntoOrdered::into_ordered).collect()
    }
}
