use std::fmt;

use crate::interpreter::lexer::Token;

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Logical NOT (`!x`).
    Bang,
    /// Arithmetic negation (`-x`).
    Minus,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Bang => "!",
            Self::Minus => "-",
        };
        write!(f, "{operator}")
    }
}

/// Represents an infix operator.
///
/// Infix operators include arithmetic, comparisons and the dot operator
/// used for member access on class instances and modules.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`)
    Minus,
    /// Multiplication (`*`)
    Asterisk,
    /// Division (`/`)
    Slash,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    LtEq,
    /// Greater than or equal (`>=`)
    GtEq,
    /// Equal to (`==`)
    Eq,
    /// Not equal to (`!=`)
    NotEq,
    /// Member access (`.`)
    Dot,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Dot => ".",
        };
        write!(f, "{operator}")
    }
}

/// The root node of a parsed source text: the list of top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// All top-level statements, in source order.
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// A brace-delimited group of statements, as used by `if`, `while`,
/// function literals and class bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// The `{` token that opened the block.
    pub token:      Token,
    /// Statements inside the block.
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// An abstract syntax tree node representing a statement.
///
/// Statements are the units the top-level program and block bodies are made
/// of. Every variant carries its originating token.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A `let` binding, optionally targeting an instance property
    /// (`let x.y = …`).
    Let {
        /// The `let` token.
        token:    Token,
        /// The name being bound.
        name:     String,
        /// The property name, when the source used dotted assignment.
        property: Option<String>,
        /// The bound value.
        value:    Expression,
    },
    /// A `return` statement.
    Return {
        /// The `return` token.
        token: Token,
        /// The returned value.
        value: Expression,
    },
    /// A standalone expression evaluated for its result.
    Expression {
        /// The first token of the expression.
        token:      Token,
        /// The expression to evaluate.
        expression: Expression,
    },
}

impl Statement {
    /// Gets the originating token of `self`.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::Let { token, .. } | Self::Return { token, .. } | Self::Expression { token, .. } => {
                token
            },
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { name,
                        property: Some(property),
                        value,
                        .. } => write!(f, "let {name}.{property} = {value};"),
            Self::Let { name, value, .. } => write!(f, "let {name} = {value};"),
            Self::Return { value, .. } => write!(f, "return {value};"),
            Self::Expression { expression, .. } => write!(f, "{expression}"),
        }
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Expressions produce values. Every variant carries its originating token;
/// the printed form of each variant re-parses to an equal tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Reference to a binding by name.
    Identifier {
        /// The identifier token.
        token: Token,
        /// Name of the binding.
        name:  String,
    },
    /// A 64-bit signed integer literal.
    IntegerLiteral {
        /// The integer token.
        token: Token,
        /// The parsed value.
        value: i64,
    },
    /// A 64-bit floating-point literal.
    FloatLiteral {
        /// The float token.
        token: Token,
        /// The parsed value.
        value: f64,
    },
    /// A boolean literal: `true` or `false`.
    BooleanLiteral {
        /// The `true` or `false` token.
        token: Token,
        /// The literal value.
        value: bool,
    },
    /// A string literal. Bytes are taken verbatim from the source.
    StringLiteral {
        /// The string token.
        token: Token,
        /// The literal text, without the quotes.
        value: String,
    },
    /// An array literal.
    ArrayLiteral {
        /// The `[` token.
        token:    Token,
        /// Elements of the array.
        elements: Vec<Expression>,
    },
    /// A hash literal. Pairs keep their source order.
    HashLiteral {
        /// The `{` token.
        token: Token,
        /// Key-value pairs, in source order.
        pairs: Vec<(Expression, Expression)>,
    },
    /// A prefix operation (e.g. `!ok`, `-x`).
    Prefix {
        /// The operator token.
        token:    Token,
        /// The prefix operator.
        operator: PrefixOperator,
        /// The operand expression.
        right:    Box<Expression>,
    },
    /// An infix operation (e.g. `a + b`, `point.x`).
    Infix {
        /// The operator token.
        token:    Token,
        /// The infix operator.
        operator: InfixOperator,
        /// Left operand.
        left:     Box<Expression>,
        /// Right operand.
        right:    Box<Expression>,
    },
    /// An index operation (e.g. `xs[0]`, `h["name"]`).
    Index {
        /// The `[` token.
        token: Token,
        /// The array or hash being indexed.
        left:  Box<Expression>,
        /// The index expression.
        index: Box<Expression>,
    },
    /// A conditional expression with an optional `else` branch.
    If {
        /// The `if` token.
        token:       Token,
        /// The condition expression.
        condition:   Box<Expression>,
        /// Block evaluated when the condition is truthy.
        consequence: BlockStatement,
        /// Block evaluated otherwise, if present.
        alternative: Option<BlockStatement>,
    },
    /// A `while` loop. Yields the last body value, or `null` when the body
    /// never ran.
    While {
        /// The `while` token.
        token:     Token,
        /// The condition expression.
        condition: Box<Expression>,
        /// The loop body.
        body:      BlockStatement,
    },
    /// A function literal (e.g. `fn(x) { x * 2 }`).
    FunctionLiteral {
        /// The `fn` token.
        token:      Token,
        /// Parameter names.
        parameters: Vec<String>,
        /// The function body.
        body:       BlockStatement,
    },
    /// A call expression. The callee may be any expression.
    Call {
        /// The `(` token.
        token:     Token,
        /// The expression being called.
        function:  Box<Expression>,
        /// Arguments, in source order.
        arguments: Vec<Expression>,
    },
    /// A class definition with a possibly-empty list of parent classes.
    Class {
        /// The `class` token.
        token:   Token,
        /// The class name.
        name:    String,
        /// Parent class names, in inheritance-priority order.
        parents: Vec<String>,
        /// The class body.
        body:    BlockStatement,
    },
    /// A module import with an optional alias.
    Import {
        /// The `import` token.
        token: Token,
        /// The logical module name.
        path:  String,
        /// The binding alias, if the source used `as`.
        alias: Option<String>,
    },
}

impl Expression {
    /// Gets the originating token of `self`.
    ///
    /// ## Example
    /// ```
    /// use monkey::interpreter::{lexer::Lexer, parser::core::Parser};
    ///
    /// let program = Parser::new(Lexer::new("x")).parse_program();
    /// let statement = &program.statements[0];
    ///
    /// assert_eq!(statement.token().line, 1);
    /// ```
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::Identifier { token, .. }
            | Self::IntegerLiteral { token, .. }
            | Self::FloatLiteral { token, .. }
            | Self::BooleanLiteral { token, .. }
            | Self::StringLiteral { token, .. }
            | Self::ArrayLiteral { token, .. }
            | Self::HashLiteral { token, .. }
            | Self::Prefix { token, .. }
            | Self::Infix { token, .. }
            | Self::Index { token, .. }
            | Self::If { token, .. }
            | Self::While { token, .. }
            | Self::FunctionLiteral { token, .. }
            | Self::Call { token, .. }
            | Self::Class { token, .. }
            | Self::Import { token, .. } => token,
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name, .. } => write!(f, "{name}"),
            // Numeric and boolean literals print their source spelling so a
            // printed tree re-lexes to the same tokens.
            Self::IntegerLiteral { token, .. }
            | Self::FloatLiteral { token, .. }
            | Self::BooleanLiteral { token, .. } => write!(f, "{}", token.literal),
            Self::StringLiteral { value, .. } => write!(f, "\"{value}\""),
            Self::ArrayLiteral { elements, .. } => {
                write!(f, "[")?;
                write_joined(f, elements)?;
                write!(f, "]")
            },
            Self::HashLiteral { pairs, .. } => {
                write!(f, "{{")?;
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
            Self::Prefix { operator, right, .. } => write!(f, "({operator}{right})"),
            Self::Infix { operator,
                          left,
                          right,
                          .. } => write!(f, "({left} {operator} {right})"),
            Self::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            Self::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                write!(f, "if({condition}) {{{consequence}}}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{{alternative}}}")?;
                }
                Ok(())
            },
            Self::While { condition, body, .. } => write!(f, "while({condition}) {{{body}}}"),
            Self::FunctionLiteral { parameters, body, .. } => {
                write!(f, "fn(")?;
                write_joined(f, parameters)?;
                write!(f, ") {{{body}}}")
            },
            Self::Call { function, arguments, .. } => {
                write!(f, "{function}(")?;
                write_joined(f, arguments)?;
                write!(f, ")")
            },
            Self::Class { name,
                          parents,
                          body,
                          .. } => {
                write!(f, "class {name}(")?;
                write_joined(f, parents)?;
                write!(f, ") {{{body}}}")
            },
            Self::Import { path, alias, .. } => {
                write!(f, "import \"{path}\"")?;
                if let Some(alias) = alias {
                    write!(f, " as \"{alias}\"")?;
                }
                // The trailing `;` keeps a printed import from fusing with
                // whatever statement follows it on reparse.
                write!(f, ";")
            },
        }
    }
}
