//! Error types for query compilation and evaluation.

use thiserror::Error;

use crate::predicate::CompareOp;
use crate::value::ValueKind;

/// A specialized Result type for the compilation pipeline.
pub(crate) type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while compiling a query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    /// A character in the query matches no lexeme rule.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The character that could not be tokenized.
        character: char,
        /// Byte offset of the character in the query.
        position: usize,
    },

    /// An integer literal does not fit in 64 bits.
    #[error("number '{lexeme}' at position {position} is out of range")]
    NumberOutOfRange {
        /// The numeric lexeme as written in the query.
        lexeme: String,
        /// Byte offset where the number starts.
        position: usize,
    },

    /// A token that does not fit the grammar at its position.
    #[error("expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        /// Description of the token kind(s) the grammar expected.
        expected: String,
        /// The token actually found.
        found: String,
        /// Byte offset of the offending token.
        position: usize,
    },

    /// The query ended in the middle of a production.
    #[error("unexpected end of query, expected {expected}")]
    UnexpectedEndOfInput {
        /// Description of the token kind(s) the grammar expected.
        expected: String,
    },

    /// Input remained after the whole grammar was matched.
    #[error("trailing input {found} at position {position}")]
    TrailingInput {
        /// The first unconsumed token.
        found: String,
        /// Byte offset of the first unconsumed token.
        position: usize,
    },

    /// The operator cannot be applied to the literal kind on its right.
    #[error(
        "invalid comparison for field '{field}': operator '{operator}' cannot be used with {kind} values"
    )]
    InvalidComparison {
        /// The field on the left-hand side of the comparison.
        field: String,
        /// The rejected operator.
        operator: CompareOp,
        /// The kind of the right-hand literal.
        kind: ValueKind,
    },
}

impl CompileError {
    /// Creates an unexpected token error.
    pub(crate) fn unexpected_token(
        expected: impl Into<String>,
        found: impl ToString,
        position: usize,
    ) -> Self {
        CompileError::UnexpectedToken {
            expected: expected.into(),
            found: found.to_string(),
            position,
        }
    }

    /// Creates an unexpected end of input error.
    pub(crate) fn end_of_input(expected: impl Into<String>) -> Self {
        CompileError::UnexpectedEndOfInput {
            expected: expected.into(),
        }
    }
}

/// Errors that can occur while evaluating a compiled predicate.
///
/// These are the caller's to handle or avoid: checking
/// [`CompiledQuery::applies_to`](crate::CompiledQuery::applies_to) before
/// evaluation rules out [`EvaluationError::MissingField`] entirely.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The context has no entry for a field the predicate reads.
    #[error("context is missing field '{field}'")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// A context value has a kind the comparison cannot accept.
    #[error("field '{field}' holds a {found} value, expected {expected}")]
    KindMismatch {
        /// The field whose value was rejected.
        field: String,
        /// The kind the comparison was compiled against.
        expected: ValueKind,
        /// The kind actually found in the context.
        found: ValueKind,
    },
}
