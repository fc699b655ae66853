//! # monkey
//!
//! monkey is a tree-walking interpreter for the Monkey scripting language,
//! extended with floats, `while` loops, classes with multiple inheritance,
//! and source-file modules. It lexes, parses, and evaluates source text
//! against a lexically-scoped environment chain.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::ParseErrors,
    interpreter::{
        evaluator::core::Evaluator,
        lexer::Lexer,
        parser::core::Parser,
        value::{core::Value, environment::Env},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expression` enums and related
/// types that represent the syntactic structure of source code as a tree.
/// The AST is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches each node's originating token for error reporting.
/// - Prints every node in a canonical, re-parseable form.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing,
/// parsing, or evaluating code. It standardizes error reporting and
/// carries detailed information about failures.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Keeps every failure message-distinguishable.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, and error handling to provide a complete runtime for
/// source code evaluation. It exposes the public API for interpreting and
/// executing expressions or programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive read-eval-print loop.
///
/// Reads a line at a time, parses and evaluates it against a persistent
/// environment, and prints the resulting value or the errors encountered.
pub mod repl;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Convert between `i64`, `usize`, and `f64` with the language's
///   widening semantics.
pub mod util;

/// Returns the final evaluation result after execution.
///
/// This function lexes and parses `source`, reports any parse errors as a
/// batch, and otherwise evaluates the program against `env`. The value of
/// the last statement is the program's result; a top-level `return`
/// unwraps to its payload.
///
/// # Errors
/// Returns the collected [`ParseErrors`] when the source does not parse,
/// or the first [`crate::error::RuntimeError`] the evaluator raises.
///
/// # Examples
/// ```
/// use monkey::{interpret, interpreter::value::environment::Environment};
///
/// let env = Environment::new();
/// let result = interpret("let a = 5; let b = a * 2; b", &env).unwrap();
/// assert_eq!(result.to_string(), "10");
///
/// // An undefined name surfaces as a runtime error.
/// let result = interpret("let y = x + 1", &env);
/// assert!(result.is_err());
/// ```
pub fn interpret(source: &str, env: &Env) -> Result<Value, Box<dyn std::error::Error>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        return Err(Box::new(ParseErrors(parser.errors().to_vec())));
    }

    let evaluator = Evaluator::new();
    Ok(evaluator.eval_program(&program, env)?)
}
