//! Recursive descent parser for filter queries.

use std::collections::HashSet;

use crate::error::{CompileError, CompileResult};
use crate::lexer::{Token, TokenKind};
use crate::predicate::{CompareOp, Predicate};
use crate::value::Value;

/// What the operand production accepts when no comparison has started yet.
const OPERAND_EXPECTED: &str = "a field name, '(' or '!'";

/// Parser for filter queries.
///
/// This is a single-token-lookahead recursive descent parser with one
/// method per nonterminal. Each reduction directly builds the predicate for
/// the matched production - no AST is materialized - and leaf comparisons
/// register their field name into the parse-scoped field set.
///
/// # Grammar
///
/// ```text
/// expr     := term ('||' expr)?
/// term     := operand ('&&' term)?
/// operand  := STRING op value
///           | '(' expr ')'
///           | '!' operand
/// op       := '>' | '<' | '>=' | '<=' | '=' | '!=' | '~'
/// value    := STRING | INTEGER | FLOAT | BOOLEAN
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `!` (NOT) - unary
/// 2. `&&` (AND)
/// 3. `||` (OR)
///
/// A parser is constructed per compile call and consumed by
/// [`Parser::parse`], so concurrent compilations share no state.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Field names referenced by comparisons, accumulated during the parse.
    fields: HashSet<String>,
}

impl Parser {
    /// Creates a parser over a token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            fields: HashSet::new(),
        }
    }

    /// Parses the token stream from the grammar's `expr` start symbol and
    /// returns the compiled predicate together with the referenced field
    /// names.
    ///
    /// Every token must be consumed; leftover input after `expr` is a parse
    /// error.
    pub fn parse(mut self) -> CompileResult<(Predicate, HashSet<String>)> {
        let predicate = self.expr()?;
        if let Some(token) = self.peek() {
            return Err(CompileError::TrailingInput {
                found: token.kind.to_string(),
                position: token.position,
            });
        }
        Ok((predicate, self.fields))
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Checks if the current token matches the expected kind.
    fn check(&self, expected: &TokenKind) -> bool {
        matches!(self.peek(), Some(token) if token.kind == *expected)
    }

    /// `expr := term ('||' expr)?`
    fn expr(&mut self) -> CompileResult<Predicate> {
        let left = self.term()?;
        if self.check(&TokenKind::Or) {
            self.advance();
            let right = self.expr()?;
            return Ok(left.or(right));
        }
        Ok(left)
    }

    /// `term := operand ('&&' term)?`
    fn term(&mut self) -> CompileResult<Predicate> {
        let left = self.operand()?;
        if self.check(&TokenKind::And) {
            self.advance();
            let right = self.term()?;
            return Ok(left.and(right));
        }
        Ok(left)
    }

    /// `operand := STRING op value | '(' expr ')' | '!' operand`
    fn operand(&mut self) -> CompileResult<Predicate> {
        let Some(token) = self.advance() else {
            return Err(CompileError::end_of_input(OPERAND_EXPECTED));
        };
        match token.kind {
            TokenKind::Not => Ok(self.operand()?.negate()),
            TokenKind::LParen => {
                let inner = self.expr()?;
                match self.advance() {
                    Some(close) if close.kind == TokenKind::RParen => Ok(inner),
                    Some(close) => Err(CompileError::unexpected_token(
                        "')'",
                        close.kind,
                        close.position,
                    )),
                    None => Err(CompileError::end_of_input("')'")),
                }
            }
            TokenKind::Str(field) => self.comparison(field),
            other => Err(CompileError::unexpected_token(
                OPERAND_EXPECTED,
                other,
                token.position,
            )),
        }
    }

    /// Semantic action for `STRING op value`: the left string is the field
    /// name, registered into the field set before the operator/kind check
    /// runs.
    fn comparison(&mut self, field: String) -> CompileResult<Predicate> {
        self.fields.insert(field.clone());
        let op = self.op()?;
        let literal = self.value()?;
        Predicate::comparison(field, op, literal)
    }

    /// `op := '>' | '<' | '>=' | '<=' | '=' | '!=' | '~'`
    fn op(&mut self) -> CompileResult<CompareOp> {
        let Some(token) = self.advance() else {
            return Err(CompileError::end_of_input("a comparison operator"));
        };
        match token.kind {
            TokenKind::Gt => Ok(CompareOp::Gt),
            TokenKind::Lt => Ok(CompareOp::Lt),
            TokenKind::Ge => Ok(CompareOp::Ge),
            TokenKind::Le => Ok(CompareOp::Le),
            TokenKind::Eq => Ok(CompareOp::Eq),
            TokenKind::Neq => Ok(CompareOp::Neq),
            TokenKind::Contains => Ok(CompareOp::Contains),
            other => Err(CompileError::unexpected_token(
                "a comparison operator",
                other,
                token.position,
            )),
        }
    }

    /// `value := STRING | INTEGER | FLOAT | BOOLEAN`
    fn value(&mut self) -> CompileResult<Value> {
        let Some(token) = self.advance() else {
            return Err(CompileError::end_of_input("a literal value"));
        };
        match token.kind {
            TokenKind::Str(text) => Ok(Value::Text(text)),
            TokenKind::Int(value) => Ok(Value::Integer(value)),
            TokenKind::Float(value) => Ok(Value::Float(value)),
            TokenKind::Bool(value) => Ok(Value::Bool(value)),
            other => Err(CompileError::unexpected_token(
                "a literal value",
                other,
                token.position,
            )),
        }
    }
}
