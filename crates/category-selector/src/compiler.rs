//! The compile entry point: query text in, predicate plus field set out.

use std::collections::HashSet;

use crate::error::{CompileError, EvaluationError};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::predicate::Predicate;
use crate::value::Context;

/// A successfully compiled query: the executable predicate and the set of
/// context fields it may read.
///
/// Both parts are immutable once compilation completes. The query holds no
/// other state, so it can be kept around and evaluated against any number
/// of contexts, from any number of threads.
#[derive(Debug)]
pub struct CompiledQuery {
    predicate: Predicate,
    fields: HashSet<String>,
}

impl CompiledQuery {
    /// Evaluates the query against a context.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingField`] when the context lacks a
    /// field an evaluated comparison reads, and
    /// [`EvaluationError::KindMismatch`] when a context value has a kind the
    /// comparison cannot accept. AND/OR short-circuit left to right, so
    /// comparisons in a short-circuited branch are never evaluated and
    /// cannot fail.
    pub fn matches(&self, context: &Context) -> Result<bool, EvaluationError> {
        self.predicate.eval(context)
    }

    /// The field names the predicate may read.
    ///
    /// Every name is the left-hand side of some comparison in the query.
    /// Fields referenced only inside short-circuited branches are still
    /// listed; [`matches`](Self::matches) may succeed without reading them.
    pub fn fields(&self) -> &HashSet<String> {
        &self.fields
    }

    /// Returns true when the context supplies every referenced field.
    ///
    /// Checking this before [`matches`](Self::matches) rules out
    /// [`EvaluationError::MissingField`] entirely.
    pub fn applies_to(&self, context: &Context) -> bool {
        self.fields.iter().all(|field| context.contains_key(field))
    }

    /// Filters contexts down to those the query selects.
    ///
    /// Contexts missing a referenced field are skipped rather than
    /// evaluated, and a context whose value kinds make the evaluation fail
    /// counts as not selected.
    pub fn select<'a>(&self, contexts: &'a [Context]) -> Vec<&'a Context> {
        contexts
            .iter()
            .filter(|context| self.applies_to(context) && self.matches(context).unwrap_or(false))
            .collect()
    }

    /// The bare predicate.
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

/// Compiles a filter query into a reusable [`CompiledQuery`].
///
/// The stages run in order and stop at the first failure: tokenize, then
/// parse from the grammar's `expr` start symbol (verifying the whole token
/// stream is consumed), validating each comparison's operator against its
/// literal kind as it is reduced. Compilation never partially succeeds:
/// either a usable query comes back, or the accumulated errors do.
///
/// # Example
///
/// ```
/// use category_selector_rs::{compile, Context, Value};
///
/// let query = compile(r#"price <= 100 && category = "tools""#).unwrap();
///
/// let item = Context::from([
///     ("price".to_string(), Value::Integer(80)),
///     ("category".to_string(), Value::Text("Tools".to_string())),
/// ]);
/// assert_eq!(query.matches(&item), Ok(true));
/// ```
///
/// # Errors
///
/// Returns the [`CompileError`]s the failing stage produced, readable as
/// human messages through `Display`.
pub fn compile(query: &str) -> Result<CompiledQuery, Vec<CompileError>> {
    let tokens = Lexer::new(query).tokenize().map_err(|error| vec![error])?;
    let (predicate, fields) = Parser::new(tokens).parse().map_err(|error| vec![error])?;
    Ok(CompiledQuery { predicate, fields })
}
