//! Name bindings threaded through the analyzer (names to types) and the
//! evaluator (names to values).
//!
//! Bindings are owned and passed by value: binding a name consumes the map
//! and returns the updated one, so a pass that fails part-way simply drops
//! its copy and the caller's bindings stay as they were.

use core::fmt;
use hashbrown::HashMap;

use crate::types::Type;
use crate::values::Value;

/// Compile-time bindings used by the type checker.
pub type SymbolTable = Bindings<Type>;

/// Run-time bindings used by the evaluator.
pub type Scope = Bindings<Value>;

#[derive(Clone, PartialEq)]
pub struct Bindings<T> {
    entries: HashMap<String, T>,
}

impl<T> Bindings<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Bindings holding exactly the given names, as used for lambda bodies.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Bind `name`, replacing any earlier binding of the same name.
    pub fn bind(mut self, name: impl Into<String>, value: T) -> Self {
        self.entries.insert(name.into(), value);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings sorted by name, for stable output.
    pub fn sorted(&self) -> Vec<(&str, &T)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<T> Default for Bindings<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Bindings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.sorted()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Bindings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}
