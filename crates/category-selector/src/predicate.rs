//! Compiled predicates and their combinators.
//!
//! A predicate is the executable form of a query: a pure function from an
//! evaluation context to a boolean. Comparisons are compiled here directly
//! from their parts (field, operator, literal); AND, OR and NOT are
//! combinators closing over child predicates.

use std::fmt;

use crate::error::{CompileError, EvaluationError};
use crate::value::{Context, Value};

/// A comparison operator between a field and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `=`
    Eq,
    /// `!=`
    Neq,
    /// `~` (substring match)
    Contains,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::Eq => "=",
            CompareOp::Neq => "!=",
            CompareOp::Contains => "~",
        };
        f.write_str(symbol)
    }
}

type EvalFn = dyn Fn(&Context) -> Result<bool, EvaluationError> + Send + Sync;

/// A compiled boolean function over an evaluation context.
///
/// Predicates hold no mutable state: evaluation reads the context and
/// nothing else, so one predicate may be invoked concurrently from multiple
/// threads, including against a shared context, as long as the caller does
/// not mutate that context during evaluation.
pub struct Predicate {
    eval: Box<EvalFn>,
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl Predicate {
    fn new(
        eval: impl Fn(&Context) -> Result<bool, EvaluationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            eval: Box::new(eval),
        }
    }

    /// Evaluates the predicate against a context.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingField`] when the context lacks a
    /// field an evaluated comparison reads, and
    /// [`EvaluationError::KindMismatch`] when a context value has a kind the
    /// comparison cannot accept. Comparisons inside a short-circuited branch
    /// are never evaluated and cannot fail.
    pub fn eval(&self, context: &Context) -> Result<bool, EvaluationError> {
        (self.eval)(context)
    }

    /// Combines two predicates with AND, evaluated left to right.
    ///
    /// The right side is not evaluated when the left side is false.
    pub(crate) fn and(self, right: Predicate) -> Predicate {
        Predicate::new(move |context| Ok(self.eval(context)? && right.eval(context)?))
    }

    /// Combines two predicates with OR, evaluated left to right.
    ///
    /// The right side is not evaluated when the left side is true.
    pub(crate) fn or(self, right: Predicate) -> Predicate {
        Predicate::new(move |context| Ok(self.eval(context)? || right.eval(context)?))
    }

    /// Negates a predicate.
    pub(crate) fn negate(self) -> Predicate {
        Predicate::new(move |context| Ok(!self.eval(context)?))
    }

    /// Builds the predicate for a single `field op literal` comparison.
    ///
    /// The operator is validated against the literal's kind first; a
    /// combination outside the compatibility matrix is a compile error,
    /// never a runtime crash.
    pub(crate) fn comparison(
        field: String,
        op: CompareOp,
        literal: Value,
    ) -> Result<Predicate, CompileError> {
        match op {
            // `~` wants a text literal; the context value is stringified,
            // so the substring test works for any value kind.
            CompareOp::Contains => match literal {
                Value::Text(needle) => Ok(Predicate::new(move |context| {
                    let value = lookup(context, &field)?;
                    Ok(value.to_string().contains(needle.as_str()))
                })),
                other => Err(CompileError::InvalidComparison {
                    field,
                    operator: op,
                    kind: other.kind(),
                }),
            },

            // `=`/`!=` accept every literal kind and compare same-kind
            // exactly; text compares case-insensitively.
            CompareOp::Eq | CompareOp::Neq => {
                let negated = op == CompareOp::Neq;
                Ok(Predicate::new(move |context| {
                    let value = lookup(context, &field)?;
                    Ok(equals(&field, value, &literal)? != negated)
                }))
            }

            // Ordering operators coerce both sides to f64, letting integer
            // context values satisfy float bounds and vice versa.
            CompareOp::Gt => Self::ordering(field, op, literal, |lhs, rhs| lhs > rhs),
            CompareOp::Lt => Self::ordering(field, op, literal, |lhs, rhs| lhs < rhs),
            CompareOp::Ge => Self::ordering(field, op, literal, |lhs, rhs| lhs >= rhs),
            CompareOp::Le => Self::ordering(field, op, literal, |lhs, rhs| lhs <= rhs),
        }
    }

    /// Predicate for one ordering comparison. The literal's bound is
    /// computed once, at compile time.
    fn ordering(
        field: String,
        op: CompareOp,
        literal: Value,
        cmp: fn(f64, f64) -> bool,
    ) -> Result<Predicate, CompileError> {
        let Some(bound) = literal.as_f64() else {
            return Err(CompileError::InvalidComparison {
                field,
                operator: op,
                kind: literal.kind(),
            });
        };
        let expected = literal.kind();
        Ok(Predicate::new(move |context| {
            let value = lookup(context, &field)?;
            match value.as_f64() {
                Some(lhs) => Ok(cmp(lhs, bound)),
                None => Err(EvaluationError::KindMismatch {
                    field: field.clone(),
                    expected,
                    found: value.kind(),
                }),
            }
        }))
    }
}

/// Looks up a field, mapping absence to an evaluation error.
fn lookup<'a>(context: &'a Context, field: &str) -> Result<&'a Value, EvaluationError> {
    context.get(field).ok_or_else(|| EvaluationError::MissingField {
        field: field.to_string(),
    })
}

/// Exact same-kind equality for `=`/`!=`; text ignores case, numbers never
/// cross-coerce.
fn equals(field: &str, value: &Value, literal: &Value) -> Result<bool, EvaluationError> {
    match (value, literal) {
        (Value::Text(v), Value::Text(l)) => Ok(v.to_lowercase() == l.to_lowercase()),
        (Value::Integer(v), Value::Integer(l)) => Ok(v == l),
        (Value::Float(v), Value::Float(l)) => Ok(v == l),
        (Value::Bool(v), Value::Bool(l)) => Ok(v == l),
        _ => Err(EvaluationError::KindMismatch {
            field: field.to_string(),
            expected: literal.kind(),
            found: value.kind(),
        }),
    }
}
