/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs arithmetic and logical operations, manages the environment
/// chain, and implements the function, class and module semantics. It is
/// the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles bindings, functions, classes, modules and control flow.
/// - Reports runtime errors such as type mismatches or unknown names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to a meaningful language element such as a number,
/// identifier, operator, delimiter, or keyword. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, literal
///   and source location.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Surfaces unrecognized bytes as `ILLEGAL` tokens.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST representing the syntactic structure of expressions
/// and statements. Expressions are parsed with Pratt-style precedence
/// climbing.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates the grammar, collecting errors with location info while
///   continuing at statement boundaries.
/// - Supports operators, calls, indexing, control flow, classes, imports.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all value types used during execution, such as
/// integers, floats, booleans, strings, arrays, hashes, functions, classes
/// and modules, together with the environment chain they live in.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements printing, truthiness and hash keys.
/// - Provides the lexically-scoped environment chain.
pub mod value;
