use std::{cell::RefCell, rc::Rc};

use fnv::FnvHashMap;

use crate::interpreter::value::core::Value;

/// A shared, mutable handle to an [`Environment`].
///
/// Environments form a chain through their outer links and a DAG overall:
/// several closures may share one outer frame, and instances share their
/// class's frame. Closures stored inside instance environments can even
/// close the chain into a cycle; those cycles are deliberately left to the
/// reference counter, since environments live for the program's lifetime
/// anyway.
pub type Env = Rc<RefCell<Environment>>;

/// A lexical-scope frame: a name→value mapping with an optional link to
/// the enclosing frame.
pub struct Environment {
    store: FnvHashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    /// Creates a new root environment with no outer frame.
    #[must_use]
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self { store: FnvHashMap::default(),
                                    outer: None, }))
    }

    /// Creates a new environment enclosed by `outer`.
    #[must_use]
    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self { store: FnvHashMap::default(),
                                    outer: Some(Rc::clone(outer)), }))
    }

    /// Looks `name` up in this store, else the outer chain, recursively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Looks `name` up in this store only, ignoring the outer chain.
    ///
    /// This is the "closed" view used for dot access on instances and
    /// modules, so their members never leak into (or out of) the enclosing
    /// scope.
    #[must_use]
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.store.get(name).cloned()
    }

    /// Whether `name` resolves anywhere along the chain.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
        || self.outer
               .as_ref()
               .is_some_and(|outer| outer.borrow().contains(name))
    }

    /// Binds `name` in this store. Never touches outer frames, so
    /// rebinding a name inside a block shadows rather than mutates.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    /// Copies every local binding of `other` into this store, skipping
    /// names already present. Copying parents left to right therefore gives
    /// the leftmost parent priority on duplicates.
    pub fn shallow_copy_from(&mut self, other: &Env) {
        for (name, value) in &other.borrow().store {
            if !self.store.contains_key(name) {
                self.store.insert(name.clone(), value.clone());
            }
        }
    }

    /// The local bindings of this frame, sorted by name.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut entries: Vec<_> = self.store
                                      .iter()
                                      .map(|(name, value)| (name.clone(), value.clone()))
                                      .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
