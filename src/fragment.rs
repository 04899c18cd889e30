//! Literal SQL fragments naming a table or a column.
//!
//! Only the canonical quoted forms that the renderer itself emits are
//! accepted:
//!
//! ```text
//! fragment := segment ( "." segment )?
//! segment  := '"' ( any char except '"' | '""' )+ '"'
//! ```
//!
//! One segment is a table reference, two segments are a column reference
//! (table first). Whitespace, unquoted names and a third segment are
//! rejected with [`Error::MalformedFragment`].

use smol_str::SmolStr;

use crate::{
    error::{Error, Result},
    expr::Expr,
    ident::{ColumnRef, TableRef},
};

/// An unparsed quoted reference such as `"users"."id"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(SmolStr);

impl Fragment {
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into the reference expression this fragment names.
    pub fn parse(&self) -> Result<Expr> {
        Ok(match parse_reference(&self.0)? {
            Reference::Table(table) => Expr::Table(table),
            Reference::Column(column) => Expr::Column(column),
        })
    }

    /// Parse, requiring a single unqualified segment.
    pub fn parse_table(&self) -> Result<TableRef> {
        match parse_reference(&self.0)? {
            Reference::Table(table) => Ok(table),
            Reference::Column(_) => Err(Error::malformed(
                &self.0,
                "expected a table reference, found a column reference",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reference {
    Table(TableRef),
    Column(ColumnRef),
}

pub(crate) fn parse_reference(fragment: &str) -> Result<Reference> {
    let mut segments: Vec<SmolStr> = Vec::with_capacity(2);
    let mut chars = fragment.chars().peekable();

    if chars.peek().is_none() {
        return Err(Error::malformed(fragment, "empty fragment"));
    }

    while chars.peek().is_some() {
        // consume '.' between segments, a segment must follow
        if !segments.is_empty() {
            match chars.next() {
                Some('.') => {
                    if chars.peek().is_none() {
                        return Err(Error::malformed(fragment, "trailing '.' separator"));
                    }
                }
                _ => return Err(Error::malformed(fragment, "expected '.' between segments")),
            }
        }

        if chars.next() != Some('"') {
            return Err(Error::malformed(fragment, "segment must start with '\"'"));
        }

        let mut name = String::new();
        loop {
            match chars.next() {
                Some('"') => {
                    // escaped quote: ""
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        name.push('"');
                    } else {
                        break;
                    }
                }
                Some(c) => name.push(c),
                None => return Err(Error::malformed(fragment, "unbalanced quote")),
            }
        }

        if name.is_empty() {
            return Err(Error::malformed(fragment, "empty identifier"));
        }
        if segments.len() == 2 {
            return Err(Error::malformed(fragment, "more than two segments"));
        }
        segments.push(SmolStr::from(name));
    }

    let mut segments = segments.into_iter();
    match (segments.next(), segments.next()) {
        (Some(table), None) => Ok(Reference::Table(TableRef::new(table))),
        (Some(table), Some(column)) => Ok(Reference::Column(ColumnRef::new(table, column))),
        _ => Err(Error::malformed(fragment, "empty fragment")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(fragment: &str) -> &'static str {
        match parse_reference(fragment) {
            Err(Error::MalformedFragment { reason, .. }) => reason,
            other => panic!("expected malformed fragment, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_table() {
        assert_eq!(
            Reference::Table(TableRef::new("users")),
            parse_reference(r#""users""#).unwrap()
        );
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(
            Reference::Column(ColumnRef::new("users", "id")),
            parse_reference(r#""users"."id""#).unwrap()
        );
    }

    #[test]
    fn test_parse_escaped_quote() {
        assert_eq!(
            Reference::Column(ColumnRef::new("us\"ers", "a.b")),
            parse_reference(r#""us""ers"."a.b""#).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!("empty fragment", reason(""));
        assert_eq!("unbalanced quote", reason(r#""users"#));
        assert_eq!("unbalanced quote", reason(r#""users"."id"#));
        assert_eq!("empty identifier", reason(r#""""#));
        assert_eq!("empty identifier", reason(r#""users"."""#));
        assert_eq!("segment must start with '\"'", reason("users"));
        assert_eq!("segment must start with '\"'", reason(r#" "users""#));
        assert_eq!("expected '.' between segments", reason(r#""users" "id""#));
        assert_eq!("trailing '.' separator", reason(r#""users"."#));
        assert_eq!("more than two segments", reason(r#""a"."b"."c""#));
    }

    #[test]
    fn test_fragment_parse_table_rejects_column() {
        let fragment = Fragment::new_static(r#""users"."id""#);
        assert!(matches!(
            fragment.parse_table(),
            Err(Error::MalformedFragment { .. })
        ));
        assert_eq!(
            TableRef::new("users"),
            Fragment::new(r#""users""#).parse_table().unwrap()
        );
    }

    #[test]
    fn test_fragment_parse_expr() {
        let expr = Fragment::new(r#""users"."name""#).parse().unwrap();
        assert_eq!(Expr::Column(ColumnRef::new("users", "name")), expr);
    }
}
