use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{
            core::{Function, Instance, Value},
            environment::{Env, Environment},
        },
    },
};

impl Evaluator {
    /// Applies a callable to already-evaluated arguments.
    ///
    /// Built-ins run natively. Functions run their body in a fresh
    /// environment enclosing their captured one, with parameters bound
    /// positionally. Calling a class constructs an instance: the instance
    /// shares the class environment, and a `__New__` function in that
    /// environment runs as a method on the new instance (its return value
    /// is discarded; the instance itself is the call's value).
    pub(crate) fn apply_function(&self, callee: &Value, arguments: &[Value]) -> EvalResult<Value> {
        match callee {
            Value::Builtin(builtin) => (builtin.apply)(arguments),
            Value::Function(function) => {
                let env = extend_function_env(function, arguments)?;
                let result = self.eval_block_statement(&function.body, &env)?;
                Ok(unwrap_return(result))
            },
            Value::Class(class) => {
                let instance = Rc::new(Instance { class: class.name.clone(),
                                                  env:   Rc::clone(&class.env), });
                let constructor = class.env.borrow().get_local("__New__");
                if let Some(constructor @ Value::Function(_)) = constructor {
                    self.apply_method(&constructor, &instance, arguments)?;
                }
                Ok(Value::Instance(instance))
            },
            _ => Err(RuntimeError::NotAFunction { found: callee.kind() }),
        }
    }

    /// Applies a function as a method on `receiver`.
    ///
    /// Identical to plain application except that `self` is bound to the
    /// receiver in the extended environment before the body runs. This is
    /// the only way `self` ever becomes available.
    pub(crate) fn apply_method(&self,
                               method: &Value,
                               receiver: &Rc<Instance>,
                               arguments: &[Value])
                               -> EvalResult<Value> {
        let Value::Function(function) = method else {
            return Err(RuntimeError::NotAFunction { found: method.kind() });
        };

        let env = extend_function_env(function, arguments)?;
        env.borrow_mut()
           .set("self", Value::Instance(Rc::clone(receiver)));

        let result = self.eval_block_statement(&function.body, &env)?;
        Ok(unwrap_return(result))
    }
}

/// Creates the call environment: a frame over the captured environment with
/// every parameter bound to its argument. Arity must match exactly.
fn extend_function_env(function: &Function, arguments: &[Value]) -> EvalResult<Env> {
    if function.parameters.len() != arguments.len() {
        return Err(RuntimeError::WrongNumberOfArguments { want: function.parameters.len(),
                                                          got:  arguments.len(), });
    }

    let env = Environment::new_enclosed(&function.env);
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        env.borrow_mut().set(parameter.clone(), argument.clone());
    }
    Ok(env)
}

fn unwrap_return(value: Value) -> Value {
    match value {
        Value::Return(inner) => *inner,
        other => other,
    }
}
