// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scopes and typed keys.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::fmt;
use core::marker::PhantomData;

use hashbrown::HashMap;

use crate::error::ContextError;

const TARGET: &str = "understory_context";

/// Name of a provision, tagged with the type stored under it.
pub struct ContextKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Create a key.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The key's name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextKey").field(&self.name).finish()
    }
}

/// A map of named instances with an optional parent.
///
/// Lookups that miss locally continue in the parent, so a child scope sees
/// everything its ancestors provide and can shadow any of it. Mutation is always
/// local: a child can neither replace nor revoke a parent's provision.
///
/// ## Example
///
/// ```rust
/// use understory_context::{ContextError, ContextKey, Scope};
///
/// const THEME: ContextKey<&str> = ContextKey::new("theme");
/// const COUNT: ContextKey<u32> = ContextKey::new("count");
///
/// let mut app = Scope::new();
/// app.provide(THEME, "dark");
///
/// let mut panel = app.child();
/// panel.provide(COUNT, 3);
/// assert_eq!(panel.resolve(THEME), Ok(&"dark"));
/// assert_eq!(panel.resolve(COUNT), Ok(&3));
/// assert_eq!(app.resolve(COUNT), Err(ContextError::Missing { key: "count" }));
/// ```
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    entries: HashMap<&'static str, Box<dyn Any>>,
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("Scope")
            .field("keys", &keys)
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

impl Default for Scope<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> Scope<'p> {
    /// Create a root scope.
    pub fn new() -> Self {
        Self {
            parent: None,
            entries: HashMap::new(),
        }
    }

    /// Create an empty scope whose lookups fall back to `self`.
    pub fn child(&self) -> Scope<'_> {
        Scope {
            parent: Some(self),
            entries: HashMap::new(),
        }
    }

    /// The parent scope, if any.
    pub fn parent(&self) -> Option<&Scope<'p>> {
        self.parent
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        core::iter::successors(self.parent, |scope| scope.parent).count()
    }

    /// Provide `value` under `key` in this scope.
    ///
    /// Returns `true` if a local provision with the same name was replaced.
    pub fn provide<T: 'static>(&mut self, key: ContextKey<T>, value: T) -> bool {
        let replaced = self.entries.insert(key.name, Box::new(value)).is_some();
        tracing::trace!(target: TARGET, key = key.name, replaced, "provided");
        replaced
    }

    /// Resolve `key` in this scope or the nearest ancestor that provides it.
    ///
    /// The nearest provision wins even if it has the wrong type; that is
    /// reported as [`ContextError::TypeMismatch`] rather than skipped.
    pub fn resolve<T: 'static>(&self, key: ContextKey<T>) -> Result<&T, ContextError> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(entry) = current.entries.get(key.name) {
                return entry
                    .downcast_ref::<T>()
                    .ok_or(ContextError::TypeMismatch {
                        key: key.name,
                        expected: type_name::<T>(),
                    });
            }
            scope = current.parent;
        }
        tracing::debug!(target: TARGET, key = key.name, "missing provision");
        Err(ContextError::Missing { key: key.name })
    }

    /// Mutable access to a provision of this scope. Ancestors are not consulted.
    pub fn resolve_mut<T: 'static>(&mut self, key: ContextKey<T>) -> Result<&mut T, ContextError> {
        let entry = self
            .entries
            .get_mut(key.name)
            .ok_or(ContextError::Missing { key: key.name })?;
        entry
            .downcast_mut::<T>()
            .ok_or(ContextError::TypeMismatch {
                key: key.name,
                expected: type_name::<T>(),
            })
    }

    /// Like [`resolve`](Self::resolve), but `None` on any failure.
    pub fn try_resolve<T: 'static>(&self, key: ContextKey<T>) -> Option<&T> {
        self.resolve(key).ok()
    }

    /// Returns `true` if `key` resolves with the right type.
    pub fn contains<T: 'static>(&self, key: ContextKey<T>) -> bool {
        self.resolve(key).is_ok()
    }

    /// Remove and return this scope's provision for `key`.
    ///
    /// A provision of another type is left in place.
    pub fn revoke<T: 'static>(&mut self, key: ContextKey<T>) -> Option<T> {
        if !self.entries.get(key.name)?.is::<T>() {
            return None;
        }
        let value = self.entries.remove(key.name)?.downcast::<T>().ok()?;
        tracing::trace!(target: TARGET, key = key.name, "revoked");
        Some(*value)
    }

    /// Number of provisions in this scope, excluding ancestors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this scope provides nothing itself.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;

    const NAME: ContextKey<String> = ContextKey::new("name");
    const ITEMS: ContextKey<Vec<u32>> = ContextKey::new("items");
    const ITEMS_AS_NAME: ContextKey<String> = ContextKey::new("items");

    #[test]
    fn resolve_walks_ancestors() {
        let mut root = Scope::new();
        root.provide(NAME, "root".to_string());
        let mut middle = root.child();
        middle.provide(ITEMS, vec![1, 2]);
        let leaf = middle.child();
        assert_eq!(leaf.depth(), 2);
        assert_eq!(leaf.resolve(NAME).map(String::as_str), Ok("root"));
        assert_eq!(leaf.resolve(ITEMS), Ok(&vec![1, 2]));
        assert!(leaf.is_empty());
    }

    #[test]
    fn child_shadows_parent() {
        let mut root = Scope::new();
        root.provide(NAME, "outer".to_string());
        let mut child = root.child();
        assert!(!child.provide(NAME, "inner".to_string()));
        assert_eq!(child.resolve(NAME).map(String::as_str), Ok("inner"));
        assert_eq!(root.resolve(NAME).map(String::as_str), Ok("outer"));
    }

    #[test]
    fn errors_name_the_key() {
        let mut scope = Scope::new();
        let missing = scope.resolve(NAME).unwrap_err();
        assert_eq!(missing, ContextError::Missing { key: "name" });
        assert!(missing.to_string().contains("`name`"));

        scope.provide(ITEMS, vec![]);
        let mismatch = scope.resolve(ITEMS_AS_NAME).unwrap_err();
        assert!(matches!(mismatch, ContextError::TypeMismatch { key: "items", .. }));
        assert!(mismatch.to_string().contains("`items`"));
        assert!(!scope.contains(ITEMS_AS_NAME));
        assert!(scope.try_resolve(ITEMS_AS_NAME).is_none());
    }

    #[test]
    fn resolve_mut_is_local() {
        let mut root = Scope::new();
        root.provide(ITEMS, vec![1]);
        root.resolve_mut(ITEMS).unwrap().push(2);
        assert_eq!(root.resolve(ITEMS), Ok(&vec![1, 2]));

        let mut child = root.child();
        assert_eq!(
            child.resolve_mut(ITEMS),
            Err(ContextError::Missing { key: "items" })
        );
    }

    #[test]
    fn revoke_checks_type() {
        let mut scope = Scope::new();
        scope.provide(ITEMS, vec![7]);
        assert_eq!(scope.revoke(ITEMS_AS_NAME), None);
        assert_eq!(scope.len(), 1);
        assert_eq!(scope.revoke(ITEMS), Some(vec![7]));
        assert_eq!(scope.revoke(ITEMS), None);
        assert!(scope.is_empty());
    }
}
