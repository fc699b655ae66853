use crate::{
    ast::{Expression, PrefixOperator},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser, Precedence},
    },
};

impl Parser<'_> {
    /// Applies the prefix parse rule of the current token.
    ///
    /// This is the Pratt dispatch table for expression-initial tokens; a
    /// token with no rule here cannot begin an expression.
    pub(crate) fn parse_prefix(&mut self) -> ParseResult<Expression> {
        match self.cur_token.kind {
            TokenKind::Ident => Ok(self.parse_identifier()),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::Str => Ok(self.parse_string_literal()),
            TokenKind::True | TokenKind::False => Ok(self.parse_boolean_literal()),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::While => self.parse_while_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            TokenKind::Class => self.parse_class_expression(),
            TokenKind::Import => self.parse_import_expression(),
            kind => Err(ParseError::NoPrefixParse { kind,
                                                    line: self.cur_token.line, }),
        }
    }

    fn parse_identifier(&mut self) -> Expression {
        Expression::Identifier { token: self.cur_token.clone(),
                                 name:  self.cur_token.literal.clone(), }
    }

    fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let value =
            token.literal
                 .parse()
                 .map_err(|_| ParseError::InvalidIntegerLiteral { literal: token.literal.clone(),
                                                                  line:    token.line, })?;
        Ok(Expression::IntegerLiteral { token, value })
    }

    fn parse_float_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let value =
            token.literal
                 .parse()
                 .map_err(|_| ParseError::InvalidFloatLiteral { literal: token.literal.clone(),
                                                                line:    token.line, })?;
        Ok(Expression::FloatLiteral { token, value })
    }

    fn parse_string_literal(&mut self) -> Expression {
        Expression::StringLiteral { token: self.cur_token.clone(),
                                    value: self.cur_token.literal.clone(), }
    }

    fn parse_boolean_literal(&mut self) -> Expression {
        Expression::BooleanLiteral { token: self.cur_token.clone(),
                                     value: self.cur_token_is(TokenKind::True), }
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let operator = match token.kind {
            TokenKind::Bang => PrefixOperator::Bang,
            _ => PrefixOperator::Minus,
        };

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix { token,
                                operator,
                                right: Box::new(right) })
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expression)
    }

    /// Parses `if ( condition ) { consequence } (else { alternative })?`.
    fn parse_if_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If { token,
                            condition: Box::new(condition),
                            consequence,
                            alternative })
    }

    /// Parses `while ( condition ) { body }`.
    fn parse_while_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::While { token,
                               condition: Box::new(condition),
                               body })
    }

    /// Parses `fn ( parameters ) { body }`.
    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::FunctionLiteral { token,
                                         parameters,
                                         body })
    }

    fn parse_function_parameters(&mut self) -> ParseResult<Vec<String>> {
        let mut parameters = Vec::new();

        if self.peek_token_is(TokenKind::RParen) {
            self.next_token();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.cur_token.literal.clone());

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.cur_token.literal.clone());
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Ok(Expression::ArrayLiteral { token, elements })
    }

    /// Parses `{ key : value , … }`. Keys may be any expression
    /// syntactically; hashability is checked at evaluation.
    fn parse_hash_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let mut pairs = Vec::new();

        while !self.peek_token_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_token_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }
        self.expect_peek(TokenKind::RBrace)?;

        Ok(Expression::HashLiteral { token, pairs })
    }

    /// Parses `class IDENT ( parents ) { body }` with a possibly-empty
    /// comma-separated parent list.
    fn parse_class_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = self.cur_token.literal.clone();

        self.expect_peek(TokenKind::LParen)?;
        let mut parents = Vec::new();
        while !self.peek_token_is(TokenKind::RParen) && !self.peek_token_is(TokenKind::Eof) {
            self.expect_peek(TokenKind::Ident)?;
            parents.push(self.cur_token.literal.clone());

            if self.peek_token_is(TokenKind::Comma) {
                self.next_token();
            }
        }
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::Class { token,
                               name,
                               parents,
                               body })
    }

    /// Parses `import "path" (as "alias")?`.
    fn parse_import_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::Str)?;
        let path = self.cur_token.literal.clone();

        let alias = if self.peek_token_is(TokenKind::As) {
            self.next_token();
            self.expect_peek(TokenKind::Str)?;
            Some(self.cur_token.literal.clone())
        } else {
            None
        };

        Ok(Expression::Import { token, path, alias })
    }
}
