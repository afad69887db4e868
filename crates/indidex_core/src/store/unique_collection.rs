//! Identity-unique ordered collection with change listeners.
//!
//! # Responsibility
//! - Hold one entity family in display order.
//! - Reject any mutation that would introduce two entities with the same identity.
//! - Push every committed mutation to subscribed listeners.
//!
//! # Invariants
//! - No two items share an identity key.
//! - Failed mutations leave items untouched and notify nobody.
//! - Listeners run after the mutation is complete, never in between.

use crate::model::identity::Identified;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Uniqueness and lookup failures, carrying the offending identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    Duplicate(String),
    NotFound(String),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate(key) => write!(f, "duplicate entity: {key}"),
            Self::NotFound(key) => write!(f, "entity not found: {key}"),
        }
    }
}

impl Error for CollectionError {}

/// Kind of mutation reported to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    Added,
    Removed,
    Replaced,
    Reset,
    Sorted,
}

/// Returned by a listener to stay subscribed or detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStatus {
    Keep,
    Detach,
}

/// Change callback; receives the post-mutation items.
pub type Listener<T> = Box<dyn FnMut(CollectionChange, &[T]) -> ListenerStatus>;

/// Ordered collection enforcing identity uniqueness.
pub struct UniqueCollection<T> {
    items: Vec<T>,
    listeners: Vec<Listener<T>>,
}

impl<T> Default for UniqueCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

impl<T: Debug> Debug for UniqueCollection<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniqueCollection")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: Identified + Clone> UniqueCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only view of the backing sequence.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns whether an item with the same identity as `item` exists.
    pub fn contains(&self, item: &T) -> bool {
        self.contains_key(item.identity_key())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.identity_key() == key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.identity_key() == key)
    }

    /// Registers a listener invoked synchronously after each committed mutation.
    pub fn subscribe(&mut self, listener: Listener<T>) {
        self.listeners.push(listener);
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Appends `item`.
    ///
    /// # Errors
    /// - `Duplicate` when an item with the same identity exists.
    pub fn add(&mut self, item: T) -> CollectionResult<()> {
        if self.contains(&item) {
            return Err(CollectionError::Duplicate(item.identity_key().to_string()));
        }
        self.items.push(item);
        self.notify(CollectionChange::Added);
        Ok(())
    }

    /// Replaces the item keyed `target` in place, keeping its position.
    ///
    /// # Errors
    /// - `NotFound` when `target` is absent.
    /// - `Duplicate` when `replacement` collides with a different existing item.
    pub fn replace(&mut self, target: &str, replacement: T) -> CollectionResult<()> {
        let index = self
            .position(target)
            .ok_or_else(|| CollectionError::NotFound(target.to_string()))?;
        let new_key = replacement.identity_key();
        if new_key != target && self.contains_key(new_key) {
            return Err(CollectionError::Duplicate(new_key.to_string()));
        }
        self.items[index] = replacement;
        self.notify(CollectionChange::Replaced);
        Ok(())
    }

    /// Applies several replacements as one mutation.
    ///
    /// Every target must exist and appear once; the resulting sequence must be
    /// identity-unique. Nothing changes unless all pairs are valid.
    pub fn replace_many(&mut self, replacements: Vec<(String, T)>) -> CollectionResult<()> {
        if replacements.is_empty() {
            return Ok(());
        }
        let mut next = self.items.clone();
        let mut seen_targets = HashSet::new();
        for (target, replacement) in replacements {
            if !seen_targets.insert(target.clone()) {
                return Err(CollectionError::Duplicate(target));
            }
            let index = self
                .position(&target)
                .ok_or(CollectionError::NotFound(target))?;
            next[index] = replacement;
        }
        ensure_unique(&next)?;
        self.items = next;
        self.notify(CollectionChange::Replaced);
        Ok(())
    }

    /// Removes and returns the item keyed `key`.
    ///
    /// # Errors
    /// - `NotFound` when absent.
    pub fn remove(&mut self, key: &str) -> CollectionResult<T> {
        let index = self
            .position(key)
            .ok_or_else(|| CollectionError::NotFound(key.to_string()))?;
        let removed = self.items.remove(index);
        self.notify(CollectionChange::Removed);
        Ok(removed)
    }

    /// Removes every listed key as one mutation, or nothing.
    ///
    /// # Errors
    /// - `NotFound` for the first absent key.
    /// - `Duplicate` when a key is listed twice.
    pub fn remove_many(&mut self, keys: &[String]) -> CollectionResult<Vec<T>> {
        let mut targets = HashSet::new();
        for key in keys {
            if !self.contains_key(key) {
                return Err(CollectionError::NotFound(key.clone()));
            }
            if !targets.insert(key.as_str()) {
                return Err(CollectionError::Duplicate(key.clone()));
            }
        }
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let (removed, kept): (Vec<T>, Vec<T>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| targets.contains(item.identity_key()));
        self.items = kept;
        self.notify(CollectionChange::Removed);
        Ok(removed)
    }

    /// Replaces the whole sequence.
    ///
    /// # Errors
    /// - `Duplicate` when `items` repeats an identity; nothing is replaced.
    pub fn set_all(&mut self, items: Vec<T>) -> CollectionResult<()> {
        ensure_unique(&items)?;
        self.items = items;
        self.notify(CollectionChange::Reset);
        Ok(())
    }

    /// Stable in-place sort; a pure permutation of the current items.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        self.notify(CollectionChange::Sorted);
    }

    fn notify(&mut self, change: CollectionChange) {
        let items = &self.items;
        self.listeners
            .retain_mut(|listener| listener(change, items) == ListenerStatus::Keep);
    }
}

fn ensure_unique<T: Identified>(items: &[T]) -> CollectionResult<()> {
    let mut keys = HashSet::with_capacity(items.len());
    for item in items {
        if !keys.insert(item.identity_key()) {
            return Err(CollectionError::Duplicate(item.identity_key().to_string()));
        }
    }
    Ok(())
}
