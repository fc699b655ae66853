use std::rc::Rc;

use crate::{
    ast::Expression,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{
            core::{Instance, Module, Value},
            environment::Env,
        },
    },
};

impl Evaluator {
    /// Evaluates `left . right`.
    ///
    /// Only class instances and modules have members. The right side must
    /// be a bare identifier (member read) or a call whose callee is one
    /// (method/function invocation); it is resolved against the owner's
    /// closed environment, so members never leak into the enclosing scope.
    pub(crate) fn eval_dot_expression(&self,
                                      left: &Expression,
                                      right: &Expression,
                                      env: &Env)
                                      -> EvalResult<Value> {
        let target = self.eval_expression(left, env)?;
        match &target {
            Value::Instance(instance) => self.eval_instance_dot(instance, right, env),
            Value::Module(module) => self.eval_module_dot(module, right, env),
            _ => Err(RuntimeError::DotNotSupported { left: target.kind() }),
        }
    }

    /// Member access on a class instance. Calls bind `self` to the
    /// receiver.
    fn eval_instance_dot(&self,
                         instance: &Rc<Instance>,
                         right: &Expression,
                         env: &Env)
                         -> EvalResult<Value> {
        match right {
            Expression::Identifier { name, .. } => lookup_member(&instance.env, name),
            Expression::Call { function, arguments, .. } => {
                let method = resolve_callee(&instance.env, function)?;
                // Arguments evaluate in the caller's scope, not the
                // instance's.
                let arguments = self.eval_expressions(arguments, env)?;
                self.apply_method(&method, instance, &arguments)
            },
            _ => Err(RuntimeError::InvalidDotAccess),
        }
    }

    /// Member access on a module. Calls run as plain functions; modules
    /// have no `self`.
    fn eval_module_dot(&self,
                       module: &Rc<Module>,
                       right: &Expression,
                       env: &Env)
                       -> EvalResult<Value> {
        match right {
            Expression::Identifier { name, .. } => lookup_member(&module.env, name),
            Expression::Call { function, arguments, .. } => {
                let callee = resolve_callee(&module.env, function)?;
                let arguments = self.eval_expressions(arguments, env)?;
                self.apply_function(&callee, &arguments)
            },
            _ => Err(RuntimeError::InvalidDotAccess),
        }
    }
}

fn lookup_member(owner: &Env, name: &str) -> EvalResult<Value> {
    owner.borrow()
         .get_local(name)
         .ok_or_else(|| RuntimeError::IdentifierNotFound { name: name.to_string() })
}

fn resolve_callee(owner: &Env, function: &Expression) -> EvalResult<Value> {
    let Expression::Identifier { name, .. } = function else {
        return Err(RuntimeError::InvalidDotAccess);
    };
    lookup_member(owner, name)
}
