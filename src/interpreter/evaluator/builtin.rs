use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::{Builtin, Type, Value},
            environment::Env,
        },
    },
    util::num::len_to_i64,
};

/// Finds the built-in function registered under `name`.
///
/// Identifier resolution consults this table before the environment chain,
/// which is what makes built-ins unshadowable by user bindings.
#[must_use]
pub fn lookup(name: &str) -> Option<Builtin> {
    let builtin = match name {
        "puts" => Builtin { name: "puts", apply: puts },
        "len" => Builtin { name: "len", apply: len },
        "first" => Builtin { name: "first", apply: first },
        "last" => Builtin { name: "last", apply: last },
        "rest" => Builtin { name: "rest", apply: rest },
        "push" => Builtin { name: "push", apply: push },
        "str" => Builtin { name: "str", apply: stringify },
        "hasattr" => Builtin { name: "hasattr", apply: hasattr },
        "setattr" => Builtin { name: "setattr", apply: setattr },
        "env" => Builtin { name: "env", apply: debug_env },
        _ => return None,
    };
    Some(builtin)
}

fn expect_arity(want: usize, arguments: &[Value]) -> EvalResult<()> {
    if arguments.len() == want {
        Ok(())
    } else {
        Err(RuntimeError::WrongNumberOfArguments { want,
                                                   got: arguments.len() })
    }
}

fn expect_array<'a>(builtin: &'static str, argument: &'a Value) -> EvalResult<&'a Rc<Vec<Value>>> {
    match argument {
        Value::Array(elements) => Ok(elements),
        other => Err(RuntimeError::ArgumentMustBe { builtin,
                                                    argument: 1,
                                                    want: Type::Array,
                                                    got: other.kind() }),
    }
}

/// `puts(xs…)`: prints the printable form of each argument on its own
/// line.
fn puts(arguments: &[Value]) -> EvalResult<Value> {
    for argument in arguments {
        println!("{argument}");
    }
    Ok(Value::Null)
}

/// `len(x)`: element count of an array, byte length of a string.
fn len(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(1, arguments)?;
    match &arguments[0] {
        Value::Array(elements) => Ok(Value::Integer(len_to_i64(elements.len()))),
        Value::Str(value) => Ok(Value::Integer(len_to_i64(value.len()))),
        other => Err(RuntimeError::UnsupportedArgument { builtin: "len",
                                                         got:     other.kind(), }),
    }
}

/// `first(a)`: the first element, or `null` for an empty array.
fn first(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(1, arguments)?;
    let elements = expect_array("first", &arguments[0])?;
    Ok(elements.first().cloned().unwrap_or(Value::Null))
}

/// `last(a)`: the last element, or `null` for an empty array.
fn last(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(1, arguments)?;
    let elements = expect_array("last", &arguments[0])?;
    Ok(elements.last().cloned().unwrap_or(Value::Null))
}

/// `rest(a)`: a new array without element 0, or `null` for an empty array.
fn rest(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(1, arguments)?;
    let elements = expect_array("rest", &arguments[0])?;
    if elements.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::Array(Rc::new(elements[1..].to_vec())))
}

/// `push(a, x)`: a new array with `x` appended; the original is unchanged.
fn push(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(2, arguments)?;
    let elements = expect_array("push", &arguments[0])?;

    let mut extended = Vec::with_capacity(elements.len() + 1);
    extended.extend(elements.iter().cloned());
    extended.push(arguments[1].clone());
    Ok(Value::Array(Rc::new(extended)))
}

/// `str(x)`: the printable form of `x` as a string.
fn stringify(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(1, arguments)?;
    Ok(Value::Str(Rc::from(arguments[0].to_string())))
}

fn expect_instance_and_name(builtin: &'static str,
                            arguments: &[Value])
                            -> EvalResult<(Env, String)> {
    let env = match &arguments[0] {
        Value::Instance(instance) => Rc::clone(&instance.env),
        other => {
            return Err(RuntimeError::ArgumentMustBe { builtin,
                                                      argument: 1,
                                                      want: Type::Instance,
                                                      got: other.kind() });
        },
    };
    let name = match &arguments[1] {
        Value::Str(name) => name.to_string(),
        other => {
            return Err(RuntimeError::ArgumentMustBe { builtin,
                                                      argument: 2,
                                                      want: Type::Str,
                                                      got: other.kind() });
        },
    };
    Ok((env, name))
}

/// `hasattr(inst, name)`: whether the instance's closed environment binds
/// `name`.
fn hasattr(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(2, arguments)?;
    let (env, name) = expect_instance_and_name("hasattr", arguments)?;
    Ok(Value::Boolean(env.borrow().get_local(&name).is_some()))
}

/// `setattr(inst, name, val)`: writes `name` into the instance environment
/// and returns `val`.
fn setattr(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(3, arguments)?;
    let (env, name) = expect_instance_and_name("setattr", arguments)?;
    env.borrow_mut().set(name, arguments[2].clone());
    Ok(arguments[2].clone())
}

/// `env(x)`: prints the environment of a class, instance or module.
fn debug_env(arguments: &[Value]) -> EvalResult<Value> {
    expect_arity(1, arguments)?;
    let env = match &arguments[0] {
        Value::Class(class) => &class.env,
        Value::Instance(instance) => &instance.env,
        Value::Module(module) => &module.env,
        other => {
            println!("no environment for {}", other.kind());
            return Ok(Value::Null);
        },
    };
    for (name, value) in env.borrow().entries() {
        println!("{name}: {value}");
    }
    Ok(Value::Null)
}
