//! Live filtered/sorted projection over a unique collection.
//!
//! # Responsibility
//! - Derive the visible subset (and optional order) of a backing collection.
//! - Re-derive synchronously whenever the backing collection commits a change.
//!
//! # Invariants
//! - The projection never holds an item absent from the latest backing state.
//! - Filtering never mutates the backing collection.
//! - The comparator is fixed at attach time; only the predicate can change.

use crate::model::identity::Identified;
use crate::store::unique_collection::{ListenerStatus, UniqueCollection};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Shared item filter.
pub type Predicate<T> = Rc<dyn Fn(&T) -> bool>;
/// Shared item ordering.
pub type Comparator<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Predicate accepting every item.
pub fn accept_all<T: 'static>() -> Predicate<T> {
    Rc::new(|_: &T| true)
}

struct ViewState<T> {
    source: Vec<T>,
    predicate: Predicate<T>,
    comparator: Option<Comparator<T>>,
    visible: Vec<T>,
    revision: u64,
}

impl<T: Clone> ViewState<T> {
    fn rebuild_from(&mut self, items: &[T]) {
        self.source = items.to_vec();
        self.rederive();
    }

    fn rederive(&mut self) {
        let predicate = Rc::clone(&self.predicate);
        let mut visible: Vec<T> = self
            .source
            .iter()
            .filter(|item| predicate(*item))
            .cloned()
            .collect();
        if let Some(comparator) = &self.comparator {
            visible.sort_by(|left, right| comparator(left, right));
        }
        self.visible = visible;
        self.revision += 1;
    }
}

/// Read-only live view of a [`UniqueCollection`].
pub struct FilteredSortedView<T> {
    state: Rc<RefCell<ViewState<T>>>,
}

impl<T: Debug> Debug for FilteredSortedView<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredSortedView")
            .field("visible", &self.state.borrow().visible)
            .finish()
    }
}

impl<T: Identified + Clone + 'static> FilteredSortedView<T> {
    /// Attaches an accept-all view in backing order.
    pub fn attach(collection: &mut UniqueCollection<T>) -> Self {
        Self::attach_with(collection, accept_all(), None)
    }

    /// Attaches an accept-all view ordered by `comparator`.
    pub fn attach_sorted(collection: &mut UniqueCollection<T>, comparator: Comparator<T>) -> Self {
        Self::attach_with(collection, accept_all(), Some(comparator))
    }

    fn attach_with(
        collection: &mut UniqueCollection<T>,
        predicate: Predicate<T>,
        comparator: Option<Comparator<T>>,
    ) -> Self {
        let mut state = ViewState {
            source: Vec::new(),
            predicate,
            comparator,
            visible: Vec::new(),
            revision: 0,
        };
        state.rebuild_from(collection.as_slice());
        let state = Rc::new(RefCell::new(state));

        let weak = Rc::downgrade(&state);
        collection.subscribe(Box::new(move |_, items| match weak.upgrade() {
            Some(state) => {
                state.borrow_mut().rebuild_from(items);
                ListenerStatus::Keep
            }
            None => ListenerStatus::Detach,
        }));

        Self { state }
    }

    /// Replaces the filter and re-derives immediately from the latest backing state.
    pub fn update_predicate(&mut self, predicate: Predicate<T>) {
        let mut state = self.state.borrow_mut();
        state.predicate = predicate;
        state.rederive();
    }

    /// Copy of the visible items in view order.
    ///
    /// The copy is detached from the view, so holding it across a store
    /// mutation is fine.
    pub fn items(&self) -> Vec<T> {
        self.state.borrow().visible.clone()
    }

    /// Visible item at zero-based `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.state.borrow().visible.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().visible.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.state
            .borrow()
            .visible
            .iter()
            .any(|item| item.identity_key() == key)
    }

    /// Number of derivations so far; increases on every backing change.
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }
}
