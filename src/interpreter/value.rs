/// The core module defines the runtime data types for evaluation.
///
/// This module declares the `Value` enum and all supported value variants,
/// the `Type` tags used in error messages, and the hash-key machinery that
/// lets integers, booleans and strings act as hash-map keys.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements the printable (`Inspect`) form of every value.
/// - Provides hash keys and the truthiness predicate.
pub mod core;
/// The environment module implements lexical scoping.
///
/// An environment is a name→value mapping with an optional link to its
/// enclosing frame. Functions capture the environment they were defined in;
/// classes, instances and modules each hold an environment of their own.
///
/// # Responsibilities
/// - Chain lookup (`get`) and closed lookup (`get_local`).
/// - Local-only writes (`set`), so inner scopes never clobber outer ones.
/// - Shallow copying for class inheritance.
pub mod environment;
