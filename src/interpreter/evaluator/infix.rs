use std::rc::Rc;

use crate::{
    ast::InfixOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::{Type, Value},
    },
    util::num::i64_to_f64,
};

impl Evaluator {
    /// Evaluates an infix operation on two already-evaluated operands.
    ///
    /// Dispatch order: homogeneous integers, homogeneous floats, mixed
    /// numerics (the integer side widens to float), value-identity equality
    /// for `==`/`!=`, the type-mismatch check, then strings. Anything left
    /// has no meaning for its operand types.
    pub(crate) fn eval_infix_expression(operator: InfixOperator,
                                        left: &Value,
                                        right: &Value)
                                        -> EvalResult<Value> {
        match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
            (Value::Float(l), Value::Float(r)) => eval_float_infix(operator, *l, *r),
            (Value::Integer(l), Value::Float(r)) => eval_float_infix(operator, i64_to_f64(*l), *r),
            (Value::Float(l), Value::Integer(r)) => eval_float_infix(operator, *l, i64_to_f64(*r)),
            _ if operator == InfixOperator::Eq => Ok(Value::Boolean(identity_eq(left, right))),
            _ if operator == InfixOperator::NotEq => Ok(Value::Boolean(!identity_eq(left, right))),
            _ if left.kind() != right.kind() => Err(RuntimeError::TypeMismatch { left: left.kind(),
                                                                                 operator,
                                                                                 right:
                                                                                     right.kind(), }),
            (Value::Str(l), Value::Str(r)) => eval_string_infix(operator, l, r),
            _ => Err(RuntimeError::UnknownInfixOperator { left: left.kind(),
                                                          operator,
                                                          right: right.kind(), }),
        }
    }

    /// Evaluates an index operation.
    ///
    /// Arrays take integer indexes and yield `null` out of range; hashes
    /// take any hashable key and yield `null` on a missing one.
    pub(crate) fn eval_index_expression(left: &Value, index: &Value) -> EvalResult<Value> {
        match (left, index) {
            (Value::Array(elements), Value::Integer(position)) => {
                let element = usize::try_from(*position).ok()
                                                        .and_then(|position| elements.get(position));
                Ok(element.cloned().unwrap_or(Value::Null))
            },
            (Value::Hash(pairs), index) => {
                let key = index.hash_key()
                               .ok_or(RuntimeError::UnusableHashKey { key: index.kind() })?;
                Ok(pairs.get(&key).map_or(Value::Null, |pair| pair.value.clone()))
            },
            _ => Err(RuntimeError::IndexNotSupported { left: left.kind() }),
        }
    }
}

fn eval_integer_infix(operator: InfixOperator, left: i64, right: i64) -> EvalResult<Value> {
    let value = match operator {
        InfixOperator::Plus => Value::Integer(left.wrapping_add(right)),
        InfixOperator::Minus => Value::Integer(left.wrapping_sub(right)),
        InfixOperator::Asterisk => Value::Integer(left.wrapping_mul(right)),
        // Integer division does not exist in this language; `/` always
        // produces a float.
        InfixOperator::Slash => Value::Float(i64_to_f64(left) / i64_to_f64(right)),
        InfixOperator::Lt => Value::Boolean(left < right),
        InfixOperator::Gt => Value::Boolean(left > right),
        InfixOperator::LtEq => Value::Boolean(left <= right),
        InfixOperator::GtEq => Value::Boolean(left >= right),
        InfixOperator::Eq => Value::Boolean(left == right),
        InfixOperator::NotEq => Value::Boolean(left != right),
        InfixOperator::Dot => {
            return Err(RuntimeError::UnknownInfixOperator { left: Type::Integer,
                                                            operator,
                                                            right: Type::Integer, });
        },
    };
    Ok(value)
}

#[allow(clippy::float_cmp)]
fn eval_float_infix(operator: InfixOperator, left: f64, right: f64) -> EvalResult<Value> {
    let value = match operator {
        InfixOperator::Plus => Value::Float(left + right),
        InfixOperator::Minus => Value::Float(left - right),
        InfixOperator::Asterisk => Value::Float(left * right),
        InfixOperator::Slash => Value::Float(left / right),
        InfixOperator::Lt => Value::Boolean(left < right),
        InfixOperator::Gt => Value::Boolean(left > right),
        InfixOperator::LtEq => Value::Boolean(left <= right),
        InfixOperator::GtEq => Value::Boolean(left >= right),
        InfixOperator::Eq => Value::Boolean(left == right),
        InfixOperator::NotEq => Value::Boolean(left != right),
        InfixOperator::Dot => {
            return Err(RuntimeError::UnknownInfixOperator { left: Type::Float,
                                                            operator,
                                                            right: Type::Float, });
        },
    };
    Ok(value)
}

fn eval_string_infix(operator: InfixOperator, left: &str, right: &str) -> EvalResult<Value> {
    match operator {
        InfixOperator::Plus => Ok(Value::Str(Rc::from(format!("{left}{right}")))),
        _ => Err(RuntimeError::UnknownInfixOperator { left: Type::Str,
                                                      operator,
                                                      right: Type::Str, }),
    }
}

/// Equality by value identity: primitives compare by payload, compound
/// values by handle, and differing variants are simply unequal.
fn identity_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Str(l), Value::Str(r)) => l == r,
        (Value::Array(l), Value::Array(r)) => Rc::ptr_eq(l, r),
        (Value::Hash(l), Value::Hash(r)) => Rc::ptr_eq(l, r),
        (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
        (Value::Class(l), Value::Class(r)) => Rc::ptr_eq(l, r),
        (Value::Instance(l), Value::Instance(r)) => Rc::ptr_eq(l, r),
        (Value::Module(l), Value::Module(r)) => Rc::ptr_eq(l, r),
        (Value::Builtin(l), Value::Builtin(r)) => l.name == r.name,
        _ => false,
    }
}
