//! Copy-on-extend variable scopes.
//!
//! A `Scope` is an immutable snapshot of name bindings shared behind an `Rc`.
//! Extending a scope (for example with a filter predicate's per-point
//! `time`/`value` bindings) copies the map so the outer scope never observes
//! the inner bindings. Inserting into a uniquely owned scope mutates in place.

use indexmap::IndexMap;
use std::rc::Rc;

/// Ordered name bindings, cheap to clone.
#[derive(Debug, Clone)]
pub struct Scope<T> {
    bindings: Rc<IndexMap<String, T>>,
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Self {
            bindings: Rc::new(IndexMap::new()),
        }
    }
}

impl<T: Clone> Scope<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bind `name`, replacing any previous binding.
    ///
    /// Copies the underlying map first if it is shared with another scope.
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        Rc::make_mut(&mut self.bindings).insert(name.into(), value);
    }

    /// Create a new scope with additional bindings layered on top.
    pub fn extend_many<I, K>(&self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let mut map = (*self.bindings).clone();
        for (name, value) in bindings {
            map.insert(name.into(), value);
        }
        Self {
            bindings: Rc::new(map),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Take the bindings out, cloning only if the map is still shared.
    pub fn into_map(self) -> IndexMap<String, T> {
        Rc::try_unwrap(self.bindings).unwrap_or_else(|shared| (*shared).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_does_not_leak_into_outer_scope() {
        let mut outer = Scope::new();
        outer.insert("A", 1);

        let inner = outer.extend_many([("value", 2), ("A", 3)]);

        assert_eq!(inner.get("value"), Some(&2));
        assert_eq!(inner.get("A"), Some(&3));
        assert_eq!(outer.get("value"), None);
        assert_eq!(outer.get("A"), Some(&1));
    }

    #[test]
    fn test_insert_after_clone_is_isolated() {
        let mut first = Scope::new();
        first.insert("A", 1);
        let snapshot = first.clone();

        first.insert("B", 2);

        assert!(first.contains("B"));
        assert!(!snapshot.contains("B"));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut scope = Scope::new();
        scope.insert("Z", 1);
        scope.insert("A", 2);
        scope.insert("Z", 3);

        let names: Vec<_> = scope.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(names, vec!["Z", "A"]);
        assert_eq!(scope.into_map().get("Z"), Some(&3));
    }
}
