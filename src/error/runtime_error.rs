use crate::{
    ast::{InfixOperator, PrefixOperator},
    interpreter::value::core::Type,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// Every evaluator arm propagates these with `?`; the first one raised
/// travels to the top level untouched and becomes the program's result.
pub enum RuntimeError {
    /// A name resolved neither to a built-in nor through the environment
    /// chain.
    IdentifierNotFound {
        /// The name that failed to resolve.
        name: String,
    },
    /// An infix operator was applied to operands of incompatible types.
    TypeMismatch {
        /// Type of the left operand.
        left:     Type,
        /// The operator.
        operator: InfixOperator,
        /// Type of the right operand.
        right:    Type,
    },
    /// An infix operator has no meaning for its (same-typed) operands.
    UnknownInfixOperator {
        /// Type of the left operand.
        left:     Type,
        /// The operator.
        operator: InfixOperator,
        /// Type of the right operand.
        right:    Type,
    },
    /// A prefix operator has no meaning for its operand.
    UnknownPrefixOperator {
        /// The operator.
        operator: PrefixOperator,
        /// Type of the operand.
        right:    Type,
    },
    /// Tried to call a value that is neither function, built-in nor class.
    NotAFunction {
        /// Type of the value that was called.
        found: Type,
    },
    /// The index operator was applied to an unindexable value.
    IndexNotSupported {
        /// Type of the value being indexed.
        left: Type,
    },
    /// A hash key of a type that cannot be hashed.
    UnusableHashKey {
        /// Type of the offending key.
        key: Type,
    },
    /// A function, built-in or constructor received the wrong number of
    /// arguments.
    WrongNumberOfArguments {
        /// The number of arguments expected.
        want: usize,
        /// The number of arguments received.
        got:  usize,
    },
    /// A built-in received an argument of a type it does not support.
    UnsupportedArgument {
        /// The built-in's name.
        builtin: &'static str,
        /// Type of the offending argument.
        got:     Type,
    },
    /// A built-in requires a specific type at a specific argument position.
    ArgumentMustBe {
        /// The built-in's name.
        builtin:  &'static str,
        /// 1-based argument position.
        argument: usize,
        /// The required type.
        want:     Type,
        /// Type of the offending argument.
        got:      Type,
    },
    /// The dot operator was applied to a value without members.
    DotNotSupported {
        /// Type of the left operand.
        left: Type,
    },
    /// The right side of a dot was neither an identifier nor a call of one.
    InvalidDotAccess,
    /// Dotted assignment on something other than a class instance.
    DotAssignmentNotSupported {
        /// Type of the assignment target.
        target: Type,
    },
    /// Dotted assignment to a property the instance does not have.
    UnknownProperty {
        /// The property name.
        property: String,
        /// The printable form of the instance.
        instance: String,
    },
    /// A name in a class's parent list did not resolve to a class.
    ParentNotClass {
        /// Type of the resolved value.
        found: Type,
    },
    /// The module resolver failed to produce source text.
    ModuleNotFound {
        /// The logical module name.
        name:    String,
        /// The resolver's failure description.
        details: String,
    },
    /// A module's source text failed to parse.
    ModuleParse {
        /// The logical module name.
        name:   String,
        /// The concatenated parse errors.
        errors: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierNotFound { name } => write!(f, "identifier not found: {name}"),
            Self::TypeMismatch { left, operator, right } => {
                write!(f, "type mismatch: {left} {operator} {right}")
            },
            Self::UnknownInfixOperator { left, operator, right } => {
                write!(f, "unknown operator: {left} {operator} {right}")
            },
            Self::UnknownPrefixOperator { operator, right } => {
                write!(f, "unknown operator: {operator}{right}")
            },
            Self::NotAFunction { found } => write!(f, "not a function: {found}"),
            Self::IndexNotSupported { left } => {
                write!(f, "index operator not supported: {left}")
            },
            Self::UnusableHashKey { key } => write!(f, "unusable as a hash key: {key}"),
            Self::WrongNumberOfArguments { want, got } => {
                write!(f, "wrong number of arguments. got={got}, want={want}")
            },
            Self::UnsupportedArgument { builtin, got } => {
                write!(f, "argument to `{builtin}` not supported, got {got}")
            },
            Self::ArgumentMustBe { builtin,
                                   argument,
                                   want,
                                   got, } => write!(f,
                                                    "argument {argument} to `{builtin}` must be {want}, got {got}"),
            Self::DotNotSupported { left } => {
                write!(f, "dot operation not supported: {left}")
            },
            Self::InvalidDotAccess => {
                write!(f, "dot access must be an identifier or a call of one")
            },
            Self::DotAssignmentNotSupported { target } => {
                write!(f, "dot assignment allowed only on class instances, got {target}")
            },
            Self::UnknownProperty { property, instance } => {
                write!(f, "{property} is not an instance variable of {instance}")
            },
            Self::ParentNotClass { found } => {
                write!(f, "parent to be inherited from must be a class, got {found}")
            },
            Self::ModuleNotFound { name, details } => {
                write!(f, "could not load module {name:?}: {details}")
            },
            Self::ModuleParse { name, errors } => {
                write!(f, "parse errors in module {name:?}: {errors}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
