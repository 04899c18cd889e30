use std::fmt::Write;

use smol_str::SmolStr;

use crate::{
    error::{Error, Result},
    fragment::Fragment,
    ident::{ColumnRef, TableRef},
    value::Value,
    writer::{FormatContext, FormatWriter},
};

pub mod binary;
pub mod order;

pub use binary::{Binary, BinaryOps, Conjunction, Operator};
pub use order::{Direction, IntoOrderList, IntoOrdered, Ordered};

/// A node of the value and condition tree.
///
/// Expressions are plain immutable data: binding builds a new tree and leaves
/// the original untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Column(ColumnRef),
    Table(TableRef),
    Placeholder(SmolStr),
    Binary(Box<Binary>),
}

impl Expr {
    /// A literal, taken verbatim: no placeholder detection happens here.
    pub fn literal<V>(value: V) -> Self
    where
        V: Into<Value>,
    {
        Self::Literal(value.into())
    }

    pub fn placeholder<T>(name: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self::Placeholder(name.into())
    }

    pub fn binary(lhs: Expr, operator: Operator, rhs: Expr) -> Self {
        Self::Binary(Box::new(Binary { lhs, operator, rhs }))
    }

    /// A string becomes a placeholder when it is exactly `%name%`.
    pub fn text<T>(value: T) -> Self
    where
        T: AsRef<str> + Into<SmolStr>,
    {
        if let Some(name) = placeholder_name(value.as_ref()) {
            return Self::Placeholder(SmolStr::new(name));
        }
        Self::Literal(Value::Text(value.into()))
    }

    pub fn asc(self) -> Ordered {
        Ordered::new(self, Direction::Asc)
    }

    pub fn desc(self) -> Ordered {
        Ordered::new(self, Direction::Desc)
    }

    /// Short name of the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Literal(_) => "literal",
            Expr::Column(_) => "column reference",
            Expr::Table(_) => "table reference",
            Expr::Placeholder(_) => "placeholder",
            Expr::Binary(_) => "binary expression",
        }
    }

    /// Call `f` with the name of every placeholder, left to right.
    pub fn visit_placeholders<F>(&self, f: &mut F)
    where
        F: FnMut(&SmolStr),
    {
        match self {
            Expr::Placeholder(name) => f(name),
            Expr::Binary(binary) => {
                binary.lhs.visit_placeholders(f);
                binary.rhs.visit_placeholders(f);
            }
            Expr::Literal(_) | Expr::Column(_) | Expr::Table(_) => {}
        }
    }
}

/// Return the name inside `%name%`, the whole string must be the placeholder.
pub(crate) fn placeholder_name(value: &str) -> Option<&str> {
    let name = value.strip_prefix('%')?.strip_suffix('%')?;
    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return None;
    }
    if chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        Some(name)
    } else {
        None
    }
}

impl BinaryOps for Expr {}

impl BinaryOps for ColumnRef {}

impl FormatWriter for Expr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            Expr::Literal(value) => value.format_writer(context),
            Expr::Column(column) => column.format_writer(context),
            Expr::Table(table) => table.format_writer(context),
            Expr::Placeholder(name) => Err(Error::UnboundPlaceholder(name.clone())),
            Expr::Binary(binary) => binary.format_writer(context),
        }
    }
}

/// Conversion into an expression, fallible for unparsed fragments.
pub trait IntoExpr {
    fn into_expr(self) -> Result<Expr>;
}

impl IntoExpr for Fragment {
    fn into_expr(self) -> Result<Expr> {
        self.parse()
    }
}

macro_rules! impl_into_expr {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoExpr for $ty {
                #[inline]
                fn into_expr(self) -> Result<Expr> {
                    Ok(Expr::from(self))
                }
            }
        )+
    };
}

macro_rules! impl_from_literal {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Expr {
                #[inline]
                fn from(value: $ty) -> Self {
                    Expr::Literal(Value::from(value))
                }
            }
        )+
        impl_into_expr!($($ty),+);
    };
}

impl_from_literal!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, char, Value);

impl<T> From<Option<T>> for Expr
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        Expr::Literal(Value::from(value))
    }
}

impl<T> IntoExpr for Option<T>
where
    T: Into<Value>,
{
    fn into_expr(self) -> Result<Expr> {
        Ok(Expr::from(self))
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::text(value)
    }
}

impl From<&String> for Expr {
    fn from(value: &String) -> Self {
        Expr::text(value.as_str())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::text(value)
    }
}

impl From<SmolStr> for Expr {
    fn from(value: SmolStr) -> Self {
        Expr::text(value)
    }
}

impl From<ColumnRef> for Expr {
    fn from(value: ColumnRef) -> Self {
        Expr::Column(value)
    }
}

impl From<TableRef> for Expr {
    fn from(value: TableRef) -> Self {
        Expr::Table(value)
    }
}

impl_into_expr!(Expr, &str, &String, String, SmolStr, ColumnRef, TableRef);
