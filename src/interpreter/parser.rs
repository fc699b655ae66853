/// The core module owns the parser state and the Pratt machinery.
///
/// It defines the `Parser` type with its two-token lookahead, the
/// precedence ladder, and `parse_expression`, which climbs precedences by
/// dispatching to the prefix and infix parse rules of the sibling modules.
pub mod core;
/// Parse rules for infix positions: operators, calls and indexing.
pub mod infix;
/// Parse rules for prefix positions: literals, identifiers, grouping, and
/// the keyword-introduced expressions (`if`, `while`, `fn`, `class`,
/// `import`).
pub mod prefix;
/// Statement-level parsing: `let`, `return`, expression statements and
/// brace-delimited blocks.
pub mod statement;
