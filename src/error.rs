//! Error types for sqlcompose

use std::fmt;

use smol_str::SmolStr;
use thiserror::Error;

/// Result type alias for building, binding and rendering statements.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The clauses a statement is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Select,
    From,
    Where,
    OrderBy,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Select => f.write_str("SELECT"),
            Clause::From => f.write_str("FROM"),
            Clause::Where => f.write_str("WHERE"),
            Clause::OrderBy => f.write_str("ORDER BY"),
        }
    }
}

/// Errors raised while composing or rendering a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required clause is missing or empty.
    #[error("incomplete statement: {0} clause is missing or empty")]
    IncompleteStatement(Clause),

    /// A single-occurrence clause was declared more than once.
    #[error("conflicting clause: {0} declared more than once")]
    ConflictingClause(Clause),

    /// A literal SQL fragment is not a canonical quoted reference.
    #[error("malformed fragment `{fragment}`: {reason}")]
    MalformedFragment {
        fragment: SmolStr,
        reason: &'static str,
    },

    /// Rendering reached a placeholder that was never bound.
    #[error("unbound placeholder `%{0}%`")]
    UnboundPlaceholder(SmolStr),

    /// A select item is not a column reference, literal or placeholder.
    #[error("invalid select item: {0} cannot be projected")]
    InvalidSelectItem(&'static str),

    /// The underlying writer failed.
    #[error(transparent)]
    Format(#[from] fmt::Error),
}

impl Error {
    pub(crate) fn malformed(fragment: &str, reason: &'static str) -> Self {
        Self::MalformedFragment {
            fragment: SmolStr::new(fragment),
            reason,
        }
    }

    /// Check if this is an unbound placeholder error
    pub fn is_unbound(&self) -> bool {
        matches!(self, Self::UnboundPlaceholder(_))
    }
}
