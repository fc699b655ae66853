use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    ast::{BlockStatement, Expression, InfixOperator, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            builtin,
            module::{FileResolver, ModuleResolver},
        },
        value::{
            core::{Function, HashPair, Value},
            environment::{Env, Environment},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure. Errors are never recovered
/// mid-walk; the first one raised propagates to the top level.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Walks an abstract syntax tree and computes its value.
///
/// The evaluator itself is almost stateless; all mutable interpreter state
/// lives in the [`Environment`] chain handed to each call. The one piece of
/// configuration it owns is the module resolver consulted by `import`
/// expressions.
///
/// ## Usage
///
/// An `Evaluator` is created once and reused for evaluating programs and
/// expressions against any number of environments.
pub struct Evaluator {
    pub(crate) resolver: Box<dyn ModuleResolver>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator that resolves modules from the current
    /// directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_resolver(Box::new(FileResolver::default()))
    }

    /// Creates an evaluator with an injected module resolver.
    #[must_use]
    pub fn with_resolver(resolver: Box<dyn ModuleResolver>) -> Self {
        Self { resolver }
    }

    /// Evaluates a whole program against `env`.
    ///
    /// Statements run in order. A `return` unwraps and ends the program; the
    /// result of the last statement is the program's result otherwise.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] any statement raises.
    pub fn eval_program(&self, program: &Program, env: &Env) -> EvalResult<Value> {
        let mut result = Value::Null;

        for statement in &program.statements {
            result = self.eval_statement(statement, env)?;
            if let Value::Return(value) = result {
                return Ok(*value);
            }
        }
        Ok(result)
    }

    /// Evaluates the statements of a block.
    ///
    /// Unlike [`Evaluator::eval_program`], a return marker passes through
    /// unopened, so the call frame that started the unwinding is the one
    /// that unwraps it.
    pub(crate) fn eval_block_statement(&self, block: &BlockStatement, env: &Env) -> EvalResult<Value> {
        let mut result = Value::Null;

        for statement in &block.statements {
            result = self.eval_statement(statement, env)?;
            if matches!(result, Value::Return(_)) {
                return Ok(result);
            }
        }
        Ok(result)
    }

    fn eval_statement(&self, statement: &Statement, env: &Env) -> EvalResult<Value> {
        match statement {
            Statement::Let { name,
                             property,
                             value,
                             .. } => self.eval_let_statement(name, property.as_deref(), value, env),
            Statement::Return { value, .. } => {
                let value = self.eval_expression(value, env)?;
                Ok(Value::Return(Box::new(value)))
            },
            Statement::Expression { expression, .. } => self.eval_expression(expression, env),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the evaluator's central dispatch: literals map directly to
    /// values, and every composite form hands off to its dedicated rule.
    pub fn eval_expression(&self, expression: &Expression, env: &Env) -> EvalResult<Value> {
        match expression {
            Expression::Identifier { name, .. } => Self::eval_identifier(name, env),
            Expression::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),
            Expression::FloatLiteral { value, .. } => Ok(Value::Float(*value)),
            Expression::BooleanLiteral { value, .. } => Ok(Value::Boolean(*value)),
            Expression::StringLiteral { value, .. } => Ok(Value::Str(Rc::from(value.as_str()))),
            Expression::ArrayLiteral { elements, .. } => {
                let elements = self.eval_expressions(elements, env)?;
                Ok(Value::Array(Rc::new(elements)))
            },
            Expression::HashLiteral { pairs, .. } => self.eval_hash_literal(pairs, env),
            Expression::Prefix { operator, right, .. } => {
                let right = self.eval_expression(right, env)?;
                Self::eval_prefix_expression(*operator, &right)
            },
            Expression::Infix { operator: InfixOperator::Dot,
                                left,
                                right,
                                .. } => self.eval_dot_expression(left, right, env),
            Expression::Infix { operator,
                                left,
                                right,
                                .. } => {
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                Self::eval_infix_expression(*operator, &left, &right)
            },
            Expression::Index { left, index, .. } => {
                let left = self.eval_expression(left, env)?;
                let index = self.eval_expression(index, env)?;
                Self::eval_index_expression(&left, &index)
            },
            Expression::If { condition,
                             consequence,
                             alternative,
                             .. } => {
                self.eval_if_expression(condition, consequence, alternative.as_ref(), env)
            },
            Expression::While { condition, body, .. } => {
                self.eval_while_expression(condition, body, env)
            },
            Expression::FunctionLiteral { parameters, body, .. } => {
                Ok(Value::Function(Rc::new(Function { parameters: parameters.clone(),
                                                      body:       body.clone(),
                                                      env:        Rc::clone(env), })))
            },
            Expression::Call { function, arguments, .. } => {
                let callee = self.eval_expression(function, env)?;
                let arguments = self.eval_expressions(arguments, env)?;
                self.apply_function(&callee, &arguments)
            },
            Expression::Class { name,
                                parents,
                                body,
                                .. } => self.eval_class_expression(name, parents, body, env),
            Expression::Import { path, alias, .. } => {
                self.eval_import_expression(path, alias.as_deref(), env)
            },
        }
    }

    /// Resolves a bare identifier.
    ///
    /// Built-ins are consulted before the environment chain, so user
    /// bindings can never shadow `puts`, `len` and friends.
    pub(crate) fn eval_identifier(name: &str, env: &Env) -> EvalResult<Value> {
        if let Some(builtin) = builtin::lookup(name) {
            return Ok(Value::Builtin(builtin));
        }
        env.borrow()
           .get(name)
           .ok_or_else(|| RuntimeError::IdentifierNotFound { name: name.to_string() })
    }

    /// Evaluates a `let` binding.
    ///
    /// The plain form always writes into the current scope's own store.
    /// The dotted form mutates a property of a class instance; the property
    /// must already exist unless the base is `self`, which is how `__New__`
    /// populates a fresh instance.
    fn eval_let_statement(&self,
                          name: &str,
                          property: Option<&str>,
                          value: &Expression,
                          env: &Env)
                          -> EvalResult<Value> {
        let value = self.eval_expression(value, env)?;

        let Some(property) = property else {
            env.borrow_mut().set(name, value);
            return Ok(Value::Null);
        };

        let target = env.borrow()
                        .get(name)
                        .ok_or_else(|| RuntimeError::IdentifierNotFound { name: name.to_string() })?;
        let Value::Instance(instance) = &target else {
            return Err(RuntimeError::DotAssignmentNotSupported { target: target.kind() });
        };

        if name != "self" && !instance.env.borrow().contains(property) {
            return Err(RuntimeError::UnknownProperty { property: property.to_string(),
                                                       instance: target.to_string(), });
        }
        instance.env.borrow_mut().set(property, value);
        Ok(Value::Null)
    }

    /// Evaluates expressions left to right; the first error short-circuits.
    pub(crate) fn eval_expressions(&self,
                                   expressions: &[Expression],
                                   env: &Env)
                                   -> EvalResult<Vec<Value>> {
        expressions.iter()
                   .map(|expression| self.eval_expression(expression, env))
                   .collect()
    }

    fn eval_hash_literal(&self,
                         pairs: &[(Expression, Expression)],
                         env: &Env)
                         -> EvalResult<Value> {
        let mut evaluated = IndexMap::new();

        for (key_expression, value_expression) in pairs {
            let key = self.eval_expression(key_expression, env)?;
            let hash_key = key.hash_key()
                              .ok_or(RuntimeError::UnusableHashKey { key: key.kind() })?;
            let value = self.eval_expression(value_expression, env)?;
            evaluated.insert(hash_key, HashPair { key, value });
        }
        Ok(Value::Hash(Rc::new(evaluated)))
    }

    fn eval_if_expression(&self,
                          condition: &Expression,
                          consequence: &BlockStatement,
                          alternative: Option<&BlockStatement>,
                          env: &Env)
                          -> EvalResult<Value> {
        if self.eval_expression(condition, env)?.is_truthy() {
            self.eval_block_statement(consequence, env)
        } else if let Some(alternative) = alternative {
            self.eval_block_statement(alternative, env)
        } else {
            Ok(Value::Null)
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// Condition and body share one environment enclosed over the current
    /// scope, so a `let` in the body shadows within the loop without
    /// touching outer bindings. The loop yields the last body value, or
    /// `null` when the body never ran; a return marker produced by the body
    /// propagates out immediately.
    fn eval_while_expression(&self,
                             condition: &Expression,
                             body: &BlockStatement,
                             env: &Env)
                             -> EvalResult<Value> {
        let loop_env = Environment::new_enclosed(env);
        let mut result = Value::Null;

        while self.eval_expression(condition, &loop_env)?.is_truthy() {
            result = self.eval_block_statement(body, &loop_env)?;
            if matches!(result, Value::Return(_)) {
                return Ok(result);
            }
        }
        Ok(result)
    }
}
