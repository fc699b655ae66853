use std::{io, path::PathBuf, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        lexer::Lexer,
        parser::core::Parser,
        value::{
            core::{Module, Value},
            environment::{Env, Environment},
        },
    },
};

/// Maps a logical module name to its source text.
///
/// The evaluator never touches the filesystem itself; `import` asks the
/// resolver it was constructed with. Hosts embed the interpreter with
/// whatever resolution policy suits them (a directory, an archive, an
/// in-memory table in tests).
pub trait ModuleResolver {
    /// Produces the source text of the module named `name`.
    ///
    /// # Errors
    /// Returns an [`io::Error`] when the module cannot be located or read.
    fn load(&self, name: &str) -> io::Result<String>;
}

/// The default resolver: reads `<root>/<name>.monkey` from the filesystem.
pub struct FileResolver {
    root: PathBuf,
}

impl FileResolver {
    /// Creates a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for FileResolver {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ModuleResolver for FileResolver {
    fn load(&self, name: &str) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(format!("{name}.monkey")))
    }
}

impl Evaluator {
    /// Evaluates `import "path" (as "alias")?`.
    ///
    /// The module's source is resolved, parsed and evaluated in a fresh
    /// root environment; its top-level bindings are reachable only through
    /// dotted access on the resulting module value, which is bound in the
    /// current scope under the alias (else the path).
    pub(crate) fn eval_import_expression(&self,
                                         path: &str,
                                         alias: Option<&str>,
                                         env: &Env)
                                         -> EvalResult<Value> {
        let source =
            self.resolver
                .load(path)
                .map_err(|error| RuntimeError::ModuleNotFound { name:    path.to_string(),
                                                                details: error.to_string(), })?;

        let mut parser = Parser::new(Lexer::new(&source));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            let errors = parser.errors()
                               .iter()
                               .map(ToString::to_string)
                               .collect::<Vec<_>>()
                               .join("; ");
            return Err(RuntimeError::ModuleParse { name: path.to_string(),
                                                   errors });
        }

        let module_env = Environment::new();
        self.eval_program(&program, &module_env)?;

        let name = alias.unwrap_or(path);
        let module = Value::Module(Rc::new(Module { name: name.to_string(),
                                                    env:  module_env, }));
        env.borrow_mut().set(name, module.clone());
        Ok(module)
    }
}
