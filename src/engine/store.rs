//! Append-only storage with typed, stable handles.
//!
//! Elements are never removed, so an `Id` handed out by `push` stays valid
//! for the lifetime of the store no matter how often it grows.

use std::fmt;
use std::marker::PhantomData;

pub struct Id<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    fn new(index: usize) -> Self {
        Id {
            index,
            _marker: PhantomData,
        }
    }

    pub fn index(self) -> usize {
        self.index
    }
}

// Manual impls so `Id<T>` is Copy/Eq regardless of `T`.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

#[derive(Debug, Clone)]
pub struct Store<T> {
    items: Vec<T>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Store { items: Vec::new() }
    }
}

impl<T> Store<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) -> Id<T> {
        self.items.push(item);
        Id::new(self.items.len() - 1)
    }

    /// Panics if `id` was not issued by this store.
    pub fn get(&self, id: Id<T>) -> &T {
        &self.items[id.index]
    }

    /// Panics if `id` was not issued by this store.
    pub fn get_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.items[id.index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = Id<T>> + '_ {
        (0..self.items.len()).map(Id::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> + '_ {
        self.items.iter().enumerate().map(|(i, item)| (Id::new(i), item))
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn replace_all(&mut self, items: Vec<T>) {
        debug_assert_eq!(items.len(), self.items.len());
        self.items = items;
    }
}
