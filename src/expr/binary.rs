use std::fmt::Write;

use sqlcompose_derive::BinaryOperator;

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

use super::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BinaryOperator)]
pub enum Operator {
    Equals,
    NotEquals,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    #[binary(logical)]
    And,
    #[binary(logical)]
    Or,
}

impl FormatWriter for Operator {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        let keyword = match self {
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::LessThan => "<",
            Operator::LessOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::And => "AND",
            Operator::Or => "OR",
        };
        context.writer.write_str(keyword)?;
        Ok(())
    }
}

/// How a condition joins the WHERE clause already declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl From<Conjunction> for Operator {
    fn from(value: Conjunction) -> Self {
        match value {
            Conjunction::And => Operator::And,
            Conjunction::Or => Operator::Or,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub(crate) lhs: Expr,
    pub(crate) operator: Operator,
    pub(crate) rhs: Expr,
}

impl Binary {
    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    fn format_operand<W: Write>(
        &self,
        operand: &Expr,
        context: &mut FormatContext<'_, W>,
    ) -> Result<()> {
        // logical operands are always wrapped, comparison operands only when nested
        let wrap = self.operator.is_logical() || matches!(operand, Expr::Binary(_));
        if wrap {
            context.writer.write_char('(')?;
        }
        operand.format_writer(context)?;
        if wrap {
            context.writer.write_char(')')?;
        }
        Ok(())
    }
}

impl FormatWriter for Binary {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.format_operand(&self.lhs, context)?;
        context.writer.write_char(' ')?;
        self.operator.format_writer(context)?;
        context.writer.write_char(' ')?;
        self.format_operand(&self.rhs, context)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ColumnRef, tests::format_writer};

    use super::*;

    fn name() -> ColumnRef {
        ColumnRef::new_static("users", "name")
    }

    #[test]
    fn test_is_logical() {
        assert!(Operator::Or.is_logical());
        assert!(Operator::And.is_logical());
        assert!(!Operator::Equals.is_logical());
        assert!(!Operator::GreaterOrEqual.is_logical());
    }

    #[test]
    fn test_format_equals() {
        let expr = name().equals("Jane");
        assert_eq!("\"users\".\"name\" = 'Jane'", format_writer(expr));
    }

    #[test]
    fn test_format_comparisons() {
        let id = ColumnRef::new_static("users", "id");
        assert_eq!("\"users\".\"id\" <> 1", format_writer(id.clone().not_equals(1)));
        assert_eq!("\"users\".\"id\" < 1", format_writer(id.clone().less_than(1)));
        assert_eq!("\"users\".\"id\" <= 1", format_writer(id.clone().less_or_equal(1)));
        assert_eq!("\"users\".\"id\" > 1", format_writer(id.clone().greater_than(1)));
        assert_eq!("\"users\".\"id\" >= 1", format_writer(id.greater_or_equal(1)));
    }

    #[test]
    fn test_format_or_parenthesized() {
        let expr = name().equals("Jane").or(name().equals("Jade"));
        assert_eq!(
            "(\"users\".\"name\" = 'Jane') OR (\"users\".\"name\" = 'Jade')",
            format_writer(expr)
        );
    }

    #[test]
    fn test_format_nested_logical() {
        let expr = name()
            .equals("Jane")
            .or(name().equals("Jade"))
            .and(name().not_equals("Joe"));
        assert_eq!(
            "((\"users\".\"name\" = 'Jane') OR (\"users\".\"name\" = 'Jade')) AND (\"users\".\"name\" <> 'Joe')",
            format_writer(expr)
        );
    }

    #[test]
    fn test_format_comparison_of_condition() {
        let expr = name().equals("Jane").equals(true);
        assert_eq!(
            "(\"users\".\"name\" = 'Jane') = TRUE",
            format_writer(expr)
        );
    }
}
