use crate::interpreter::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token stream.
///
/// The parser does not stop at the first failure; it collects one of these
/// per failed statement and keeps going, so a single run reports every
/// syntax problem in the source.
pub enum ParseError {
    /// The token at expression position has no prefix parse rule.
    NoPrefixParse {
        /// The offending token kind.
        kind: TokenKind,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The next token was not the one the grammar requires.
    UnexpectedToken {
        /// The token kind the parser expected.
        expected: TokenKind,
        /// The token kind actually found.
        found:    TokenKind,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An integer literal did not fit the 64-bit value range.
    InvalidIntegerLiteral {
        /// The literal spelling.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A float literal could not be converted to a 64-bit float.
    InvalidFloatLiteral {
        /// The literal spelling.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An index expression with nothing between the brackets.
    EmptyIndex {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPrefixParse { kind, line } => {
                write!(f, "line {line}: no prefix parse function for {kind} found")
            },
            Self::UnexpectedToken { expected, found, line } => write!(f,
                                                                      "line {line}: expected next token to be {expected}, got {found} instead"),
            Self::InvalidIntegerLiteral { literal, line } => {
                write!(f, "line {line}: could not parse {literal:?} as integer")
            },
            Self::InvalidFloatLiteral { literal, line } => {
                write!(f, "line {line}: could not parse {literal:?} as float")
            },
            Self::EmptyIndex { line } => {
                write!(f, "line {line}: expected an expression between `[` and `]`")
            },
        }
    }
}

impl std::error::Error for ParseError {}

/// The full batch of errors from one parser run, reported together before
/// evaluation is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parser errors:")?;
        for error in &self.0 {
            write!(f, "\n\t{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
