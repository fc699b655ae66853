use std::rc::Rc;

use crate::{
    ast::BlockStatement,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{
            core::{Class, Function, Value},
            environment::{Env, Environment},
        },
    },
};

impl Evaluator {
    /// Evaluates a class definition.
    ///
    /// Parents resolve first and must all be classes; their bindings are
    /// shallow-copied into the new class environment left to right, with
    /// the leftmost parent winning duplicates. The body then evaluates
    /// inside that environment, and the class is bound under its declared
    /// name in the defining scope.
    pub(crate) fn eval_class_expression(&self,
                                        name: &str,
                                        parents: &[String],
                                        body: &BlockStatement,
                                        env: &Env)
                                        -> EvalResult<Value> {
        let class_env = Environment::new_enclosed(env);

        for parent in parents {
            let resolved = Self::eval_identifier(parent, env)?;
            let Value::Class(parent_class) = &resolved else {
                return Err(RuntimeError::ParentNotClass { found: resolved.kind() });
            };
            class_env.borrow_mut().shallow_copy_from(&parent_class.env);
        }

        self.eval_block_statement(body, &class_env)?;
        rebind_methods(&class_env, env);

        let class = Value::Class(Rc::new(Class { name: name.to_string(),
                                                 env:  class_env, }));
        env.borrow_mut().set(name, class.clone());
        Ok(class)
    }
}

/// Re-points every function defined in the class body at the environment
/// outside the class. Methods therefore see lexical globals plus their
/// `self`, never sibling class members directly. Functions copied in from
/// parents already went through this at their own definition and keep their
/// environment.
fn rebind_methods(class_env: &Env, outer: &Env) {
    let entries = class_env.borrow().entries();

    for (binding, value) in entries {
        if let Value::Function(function) = &value
           && Rc::ptr_eq(&function.env, class_env)
        {
            let rebound = Function { parameters: function.parameters.clone(),
                                     body:       function.body.clone(),
                                     env:        Rc::clone(outer), };
            class_env.borrow_mut().set(binding, Value::Function(Rc::new(rebound)));
        }
    }
}
