use std::{fmt, hash::Hasher, rc::Rc};

use fnv::FnvHasher;
use indexmap::IndexMap;

use crate::{
    ast::BlockStatement,
    interpreter::{evaluator::core::EvalResult, value::environment::Env},
};

/// The type tag of a runtime value, as it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// A 64-bit signed integer.
    Integer,
    /// A 64-bit floating-point number.
    Float,
    /// A boolean.
    Boolean,
    /// The null value.
    Null,
    /// A string.
    Str,
    /// An array.
    Array,
    /// A hash map.
    Hash,
    /// A user-defined function.
    Function,
    /// A built-in host function.
    Builtin,
    /// A class.
    Class,
    /// An instance of a class.
    Instance,
    /// An imported module.
    Module,
    /// The internal return marker.
    Return,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::Str => "STRING",
            Self::Array => "ARRAY",
            Self::Hash => "HASH",
            Self::Function => "FUNCTION",
            Self::Builtin => "BUILTIN",
            Self::Class => "CLASS",
            Self::Instance => "CLASS_INSTANCE",
            Self::Module => "MODULE",
            Self::Return => "RETURN_VALUE",
        };
        write!(f, "{name}")
    }
}

/// The key under which a hashable value is stored in a hash map.
///
/// Integers bitcast their payload, booleans use 0 or 1, and strings hash
/// their bytes with 64-bit FNV-1a. Two distinct strings colliding on the
/// same hash is accepted behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    /// The tag of the key's value type.
    pub kind:  Type,
    /// The 64-bit key payload.
    pub value: u64,
}

/// One entry of a hash map: the original key value next to the payload.
#[derive(Debug, Clone)]
pub struct HashPair {
    /// The key, as written.
    pub key:   Value,
    /// The stored payload.
    pub value: Value,
}

/// A user-defined function: its parameters, its body, and the environment
/// it captured at the point of definition.
pub struct Function {
    /// Parameter names, in order.
    pub parameters: Vec<String>,
    /// The function body.
    pub body:       BlockStatement,
    /// The captured defining environment.
    pub env:        Env,
}

/// A class: a named environment holding the class's bindings (including
/// those shallow-copied from its parents).
pub struct Class {
    /// The declared class name.
    pub name: String,
    /// The class environment.
    pub env:  Env,
}

/// An instance of a class. The environment is shared with the class that
/// constructed it.
pub struct Instance {
    /// The name of the constructing class.
    pub class: String,
    /// The instance environment.
    pub env:   Env,
}

/// An imported module: its logical name and the root environment its
/// top-level bindings live in.
pub struct Module {
    /// The logical module name.
    pub name: String,
    /// The module environment.
    pub env:  Env,
}

/// The native signature of a built-in function.
pub type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// A named host function exposed to scripts.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// The name scripts call the built-in by.
    pub name:  &'static str,
    /// The native callable.
    pub apply: BuiltinFn,
}

/// Represents a runtime value in the interpreter.
///
/// This enum models every type that can appear in expressions, bindings,
/// function returns and conditions. Compound values share their payload
/// through `Rc`, so cloning a value never copies an array, a hash or an
/// environment.
#[derive(Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// A string of UTF-8 bytes.
    Str(Rc<str>),
    /// The null value.
    Null,
    /// An ordered sequence of values.
    Array(Rc<Vec<Value>>),
    /// A hash map. Pairs keep their insertion order.
    Hash(Rc<IndexMap<HashKey, HashPair>>),
    /// A user-defined function with its captured environment.
    Function(Rc<Function>),
    /// A built-in host function.
    Builtin(Builtin),
    /// A class.
    Class(Rc<Class>),
    /// An instance of a class.
    Instance(Rc<Instance>),
    /// An imported module.
    Module(Rc<Module>),
    /// The internal return marker. Never the final result of a program;
    /// unwrapped at the nearest enclosing call frame.
    Return(Box<Value>),
}

impl Value {
    /// Gets the type tag of `self`.
    #[must_use]
    pub const fn kind(&self) -> Type {
        match self {
            Self::Integer(_) => Type::Integer,
            Self::Float(_) => Type::Float,
            Self::Boolean(_) => Type::Boolean,
            Self::Str(_) => Type::Str,
            Self::Null => Type::Null,
            Self::Array(_) => Type::Array,
            Self::Hash(_) => Type::Hash,
            Self::Function(_) => Type::Function,
            Self::Builtin(_) => Type::Builtin,
            Self::Class(_) => Type::Class,
            Self::Instance(_) => Type::Instance,
            Self::Module(_) => Type::Module,
            Self::Return(_) => Type::Return,
        }
    }

    /// The truthiness predicate: `null` and `false` are false, everything
    /// else is true.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }

    /// Computes the hash key of `self`, or `None` for unhashable values.
    ///
    /// Only integers, booleans and strings are hashable.
    ///
    /// # Examples
    /// ```
    /// use monkey::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(3).hash_key().is_some());
    /// assert!(Value::Null.hash_key().is_none());
    /// ```
    #[must_use]
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Self::Integer(value) => value.cast_unsigned(),
            Self::Boolean(value) => u64::from(*value),
            Self::Str(value) => {
                let mut hasher = FnvHasher::default();
                hasher.write(value.as_bytes());
                hasher.finish()
            },
            _ => return None,
        };
        Some(HashKey { kind: self.kind(),
                       value })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:.6}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
            Self::Array(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::Hash(pairs) => {
                write!(f, "{{")?;
                for (index, pair) in pairs.values().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            },
            Self::Function(function) => {
                write!(f, "fn(")?;
                for (index, parameter) in function.parameters.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ") {{\n{}\n}}", function.body)
            },
            Self::Builtin(_) => write!(f, "builtin function"),
            Self::Class(class) => write!(f, "class {}", class.name),
            Self::Instance(instance) => write!(f, "<Instance of Class {}>", instance.class),
            Self::Module(module) => write!(f, "module {}", module.name),
            Self::Return(value) => write!(f, "{value}"),
        }
    }
}

// Environments can be cyclic through closures stored in instances, so the
// derived recursive Debug is off the table.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.kind())
    }
}
