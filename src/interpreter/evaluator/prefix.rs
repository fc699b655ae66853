use crate::{
    ast::PrefixOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a prefix operation on an already-evaluated operand.
    ///
    /// `!` negates truthiness and is defined for every value; `-` is
    /// defined for integers only.
    pub(crate) fn eval_prefix_expression(operator: PrefixOperator,
                                         right: &Value)
                                         -> EvalResult<Value> {
        match operator {
            PrefixOperator::Bang => Ok(Value::Boolean(!right.is_truthy())),
            PrefixOperator::Minus => match right {
                Value::Integer(value) => Ok(Value::Integer(value.wrapping_neg())),
                _ => Err(RuntimeError::UnknownPrefixOperator { operator,
                                                               right: right.kind(), }),
            },
        }
    }
}
