use crate::{
    ast::{Expression, InfixOperator},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser, Precedence},
    },
};

const fn infix_operator(kind: TokenKind) -> InfixOperator {
    match kind {
        TokenKind::Plus => InfixOperator::Plus,
        TokenKind::Minus => InfixOperator::Minus,
        TokenKind::Asterisk => InfixOperator::Asterisk,
        TokenKind::Slash => InfixOperator::Slash,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        TokenKind::LtEq => InfixOperator::LtEq,
        TokenKind::GtEq => InfixOperator::GtEq,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        _ => InfixOperator::Dot,
    }
}

impl Parser<'_> {
    /// Parses a binary operator expression. The current token is the
    /// operator; `left` is the already-parsed left operand.
    pub(crate) fn parse_infix_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let operator = infix_operator(token.kind);
        let precedence = self.cur_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix { token,
                               operator,
                               left: Box::new(left),
                               right: Box::new(right) })
    }

    /// Parses a call expression. The current token is the `(` following the
    /// callee; `function` is the callee expression.
    pub(crate) fn parse_call_expression(&mut self, function: Expression) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Ok(Expression::Call { token,
                              function: Box::new(function),
                              arguments })
    }

    /// Parses an index expression. The current token is the `[` following
    /// the indexed value. An empty `[]` is a parse error.
    pub(crate) fn parse_index_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.next_token();
        if self.cur_token_is(TokenKind::RBracket) {
            return Err(ParseError::EmptyIndex { line: token.line });
        }
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Ok(Expression::Index { token,
                               left: Box::new(left),
                               index: Box::new(index) })
    }

    /// Parses a comma-separated expression list terminated by `end`. Used
    /// for call arguments and array literals.
    pub(crate) fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_token_is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(list)
    }
}
