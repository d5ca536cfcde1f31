//! Compiles boolean filter queries into reusable predicates.
//!
//! A query such as `category = "tools" && price < 100` compiles into a
//! predicate that is evaluated against a key/value [`Context`] (for example,
//! the attribute map of a catalog item), together with the set of field
//! names the predicate reads.
//!
//! # Query Syntax
//!
//! ## Comparisons
//! - `field = value` / `field != value` - equality; text equality ignores case
//! - `field > value`, `field < value`, `field >= value`, `field <= value` -
//!   numeric ordering (integers and floats compare interchangeably)
//! - `field ~ "text"` - substring match, case-sensitive
//!
//! ## Literals
//! - integers (`42`, `-3`, `+7`) and floats (`2.5`, `-0.1`)
//! - booleans `true` / `false`
//! - strings, either double-quoted (`"Misc works"`) or a bareword (`tools`)
//!
//! ## Boolean Operators
//! - `&&` - AND
//! - `||` - OR
//! - `!` - NOT
//! - `()` - grouping
//!
//! # Example
//!
//! ```
//! use category_selector_rs::{compile, Context, Value};
//!
//! let query = compile("a > -2.2 && c = true").unwrap();
//! assert_eq!(query.fields().len(), 2);
//!
//! let selected = Context::from([
//!     ("a".to_string(), Value::Integer(10)),
//!     ("c".to_string(), Value::Bool(true)),
//! ]);
//! let rejected = Context::from([
//!     ("a".to_string(), Value::Integer(-10)),
//!     ("c".to_string(), Value::Bool(true)),
//! ]);
//!
//! assert_eq!(query.matches(&selected), Ok(true));
//! assert_eq!(query.matches(&rejected), Ok(false));
//! ```

mod compiler;
mod error;
mod lexer;
mod parser;
mod predicate;
mod value;

pub use compiler::{compile, CompiledQuery};
pub use error::{CompileError, EvaluationError};
pub use predicate::{CompareOp, Predicate};
pub use value::{Context, Value, ValueKind};
