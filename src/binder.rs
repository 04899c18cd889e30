//! Placeholder binding.
//!
//! Binding never mutates its input. Placeholders absent from the bindings are
//! left as they are, so a template can be bound in several steps.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::{
    expr::{Binary, Expr, Ordered},
    statement::Statement,
    value::Value,
};

/// Values to bind, keyed by placeholder name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bindings(IndexMap<SmolStr, Value>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, returning the bindings for chaining.
    pub fn set<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<SmolStr>,
        V: Into<Value>,
    {
        self.insert(name, value);
        self
    }

    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<Value>
    where
        N: Into<SmolStr>,
        V: Into<Value>,
    {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &Value)> {
        self.0.iter()
    }
}

impl<N, V> FromIterator<(N, V)> for Bindings
where
    N: Into<SmolStr>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        bindings.extend(iter);
        bindings
    }
}

impl<N, V> Extend<(N, V)> for Bindings
where
    N: Into<SmolStr>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<N, V, const L: usize> From<[(N, V); L]> for Bindings
where
    N: Into<SmolStr>,
    V: Into<Value>,
{
    fn from(value: [(N, V); L]) -> Self {
        value.into_iter().collect()
    }
}

/// Produce a copy of `self` with bound placeholders replaced by literals.
pub(crate) trait Substitute {
    fn substitute(&self, bindings: &Bindings) -> Self;
}

impl Substitute for Expr {
    fn substitute(&self, bindings: &Bindings) -> Self {
        match self {
            Expr::Placeholder(name) => match bindings.get(name) {
                Some(value) => Expr::Literal(value.clone()),
                None => self.clone(),
            },
            Expr::Binary(binary) => Expr::Binary(Box::new(Binary {
                lhs: binary.lhs.substitute(bindings),
                operator: binary.operator,
                rhs: binary.rhs.substitute(bindings),
            })),
            Expr::Literal(_) | Expr::Column(_) | Expr::Table(_) => self.clone(),
        }
    }
}

impl Substitute for Ordered {
    fn substitute(&self, bindings: &Bindings) -> Self {
        Ordered {
            expr: self.expr.substitute(bindings),
            direction: self.direction,
        }
    }
}

impl Substitute for Statement {
    fn substitute(&self, bindings: &Bindings) -> Self {
        Statement {
            select: self.select.iter().map(|e| e.substitute(bindings)).collect(),
            from: self.from.clone(),
            filter: self.filter.as_ref().map(|e| e.substitute(bindings)),
            order_by: self.order_by.iter().map(|o| o.substitute(bindings)).collect(),
        }
    }
}

/// Bind `bindings` into `statement`, returning a new statement.
pub fn bind(statement: &Statement, bindings: &Bindings) -> Statement {
    let bound = statement.substitute(bindings);
    tracing::trace!(
        bound = bindings.len(),
        remaining = bound.placeholders().len(),
        "statement bound"
    );
    bound
}
