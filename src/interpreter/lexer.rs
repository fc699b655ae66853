use logos::Logos;

/// The kind of a lexical token.
///
/// This enum defines every token the language recognizes. Keyword
/// recognition is the fixed `#[token]` table below; anything matching the
/// identifier pattern that is not listed there lexes as [`TokenKind::Ident`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// Floating-point literal tokens, such as `3.14`. Both sides of the dot
    /// carry at least one digit; a second dot is never consumed.
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    Int,
    /// String literal tokens. No escape processing is performed; the bytes
    /// between the quotes are taken verbatim. A string left unterminated at
    /// the end of input still lexes as a string.
    #[regex(r#""[^"]*""#)]
    #[regex(r#""[^"]*"#)]
    Str,
    /// Identifier tokens; variable, function and class names such as `x`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    /// `fn`
    #[token("fn")]
    Function,
    /// `let`
    #[token("let")]
    Let,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `return`
    #[token("return")]
    Return,
    /// `class`
    #[token("class")]
    Class,
    /// `import`
    #[token("import")]
    Import,
    /// `as`
    #[token("as")]
    As,

    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `!`
    #[token("!")]
    Bang,
    /// `*`
    #[token("*")]
    Asterisk,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Lt,
    /// `>`
    #[token(">")]
    Gt,
    /// `<=`
    #[token("<=")]
    LtEq,
    /// `>=`
    #[token(">=")]
    GtEq,
    /// `==`
    #[token("==")]
    Eq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `.`
    #[token(".")]
    Dot,

    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,

    /// A byte the lexer does not recognize.
    Illegal,
    /// End of input. Produced forever once the input is exhausted.
    Eof,

    /// Line feeds advance the line counter and are then skipped.
    #[token("\n", newline)]
    Newline,
    /// Spaces, tabs and feeds carry no meaning.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Float => "FLOAT",
            Self::Int => "INT",
            Self::Str => "STRING",
            Self::Ident => "IDENT",
            Self::Function => "FUNCTION",
            Self::Let => "LET",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::While => "WHILE",
            Self::Return => "RETURN",
            Self::Class => "CLASS",
            Self::Import => "IMPORT",
            Self::As => "AS",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Bang => "!",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Newline | Self::Ignored => "",
        };
        write!(f, "{name}")
    }
}

/// A lexical token: its kind, its literal spelling and the source position
/// at which its first character was seen.
///
/// String literals exclude their delimiters. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind.
    pub kind:    TokenKind,
    /// The literal text of the token.
    pub literal: String,
    /// The source line of the token's first character.
    pub line:    usize,
    /// The source column of the token's first character.
    pub column:  usize,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset at which that line
/// begins, so every token can be stamped with a line and a column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

fn newline(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

/// Produces [`Token`]s from a source string.
///
/// The scanner itself is generated by [`logos`] from the [`TokenKind`]
/// patterns; this type adapts it to the token contract the parser consumes:
/// positions on every token, unrecognized bytes surfaced as
/// [`TokenKind::Illegal`], and an endless stream of [`TokenKind::Eof`] once
/// the input is exhausted.
///
/// # Examples
/// ```
/// use monkey::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("let five = 5;");
///
/// assert_eq!(lexer.next_token().kind, TokenKind::Let);
/// assert_eq!(lexer.next_token().literal, "five");
/// ```
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `input`.
    #[must_use]
    pub fn new(input: &'src str) -> Self {
        Self { inner: TokenKind::lexer_with_extras(input, LexerExtras::default()) }
    }

    /// Reads and returns the next token.
    pub fn next_token(&mut self) -> Token {
        let Some(scanned) = self.inner.next() else {
            let column = self.inner.source().len() - self.inner.extras.line_start + 1;
            return Token { kind:    TokenKind::Eof,
                           literal: String::new(),
                           line:    self.inner.extras.line,
                           column, };
        };

        let span = self.inner.span();
        let line = self.inner.extras.line;
        let column = span.start - self.inner.extras.line_start + 1;

        match scanned {
            Ok(TokenKind::Str) => {
                let slice = self.inner.slice();
                let body = slice.strip_prefix('"').unwrap_or(slice);
                let body = body.strip_suffix('"').unwrap_or(body);
                Token { kind:    TokenKind::Str,
                        literal: body.to_string(),
                        line,
                        column, }
            },
            Ok(kind) => Token { kind,
                                literal: self.inner.slice().to_string(),
                                line,
                                column, },
            Err(()) => Token { kind: TokenKind::Illegal,
                               literal: self.inner.slice().to_string(),
                               line,
                               column, },
        }
    }
}
