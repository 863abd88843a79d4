//! Generic list model implementation.
//!
//! `ListModel<T>` holds an ordered sequence of records and emits
//! [`ModelSignals`] for every structural change, so an attached view can
//! insert, remove or refresh the matching rows.

use std::fmt;

use multiwidget_core::logging::targets;
use parking_lot::RwLock;

use super::traits::{ItemModel, ModelSignals};

/// A generic list model.
///
/// Items live behind a `RwLock`; every accessor releases the lock before
/// emitting, so connected slots may read (or mutate) the model freely.
///
/// # Example
///
/// ```
/// use multiwidget::model::{ItemModel, ListModel};
///
/// let model = ListModel::new(vec!["brightness".to_string()]);
/// model.signals().rows_inserted.connect(|(first, last)| {
///     println!("inserted {first}..={last}");
/// });
/// model.push("entity_id".to_string());
/// assert_eq!(model.len(), 2);
/// ```
pub struct ListModel<T> {
    items: RwLock<Vec<T>>,
    signals: ModelSignals,
}

impl<T: Send + Sync + 'static> ListModel<T> {
    /// Creates a list model holding `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            signals: ModelSignals::new(),
        }
    }

    /// Creates an empty list model.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the number of items in the model.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the model is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Appends an item to the end of the list and returns its row.
    pub fn push(&self, item: T) -> usize {
        let row = self.items.read().len();
        self.signals.emit_rows_inserted(row, row, || {
            self.items.write().push(item);
        });
        tracing::trace!(target: targets::MODEL, row, "row appended");
        row
    }

    /// Removes and returns the item at `index`, or `None` if it is out of range.
    ///
    /// No signals are emitted when nothing is removed.
    pub fn take(&self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        let mut removed = None;
        self.signals.emit_rows_removed(index, index, || {
            let mut items = self.items.write();
            if index < items.len() {
                removed = Some(items.remove(index));
            }
        });
        removed
    }

    /// Removes all items from the model.
    pub fn clear(&self) {
        self.signals.emit_reset(|| {
            self.items.write().clear();
        });
    }

    /// Replaces all items in the model.
    pub fn set_items(&self, items: Vec<T>) {
        self.signals.emit_reset(|| {
            *self.items.write() = items;
        });
    }

    /// Returns a reference to the items (read-only access).
    ///
    /// Do not hold the returned guard across a call that mutates the model.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Reads the item at `index` through a closure.
    pub fn with_item<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.items.read().get(index).map(f)
    }

    /// Provides mutable access to an item via a closure.
    ///
    /// Emits `data_changed` for the row after modification.
    pub fn modify<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut items = self.items.write();
        let item = items.get_mut(index)?;
        let result = f(item);
        drop(items);

        self.signals.emit_data_changed_single(index);
        Some(result)
    }

    /// Returns the position of the first item matching `predicate`.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.read().iter().position(predicate)
    }
}

impl<T: Clone + Send + Sync + 'static> ListModel<T> {
    /// Returns a copy of the item at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a copy of all items.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T: Send + Sync + 'static> Default for ListModel<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Send + Sync + 'static> ItemModel for ListModel<T> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}

impl<T> fmt::Debug for ListModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListModel")
            .field("len", &self.items.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn letters() -> ListModel<String> {
        ListModel::new(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    }

    #[test]
    fn test_push_and_signals() {
        let model = ListModel::<String>::empty();
        let inserted = Arc::new(Mutex::new(Vec::new()));

        let recv = inserted.clone();
        model.signals().rows_inserted.connect(move |(first, last)| {
            recv.lock().push((*first, *last));
        });

        assert_eq!(model.push("New".into()), 0);
        assert_eq!(model.push("Newer".into()), 1);

        assert_eq!(model.len(), 2);
        assert_eq!(*inserted.lock(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_take_and_signals() {
        let model = letters();
        let removed = Arc::new(Mutex::new(Vec::new()));

        let recv = removed.clone();
        model.signals().rows_removed.connect(move |(first, last)| {
            recv.lock().push((*first, *last));
        });

        assert_eq!(model.take(1).as_deref(), Some("B"));
        assert_eq!(model.to_vec(), vec!["A".to_string(), "C".to_string()]);
        assert_eq!(*removed.lock(), vec![(1, 1)]);
    }

    #[test]
    fn test_take_out_of_range_is_silent() {
        let model = letters();
        let fired = Arc::new(Mutex::new(false));

        let recv = fired.clone();
        model
            .signals()
            .rows_about_to_be_removed
            .connect(move |_| *recv.lock() = true);

        assert!(model.take(7).is_none());
        assert!(!*fired.lock());
        assert_eq!(model.take(0).as_deref(), Some("A"));
        assert!(*fired.lock());
    }

    #[test]
    fn test_slot_can_read_model_during_signal() {
        let model = Arc::new(letters());
        let seen = Arc::new(Mutex::new(None));

        let model_clone = model.clone();
        let recv = seen.clone();
        model.signals().rows_removed.connect(move |_| {
            *recv.lock() = Some(model_clone.len());
        });

        model.take(0);
        assert_eq!(*seen.lock(), Some(2));
    }

    #[test]
    fn test_set_items_resets() {
        let model = letters();
        let resets = Arc::new(Mutex::new(0));

        let recv = resets.clone();
        model.signals().model_reset.connect(move |_| *recv.lock() += 1);

        model.set_items(vec!["Z".to_string()]);
        model.clear();

        assert!(model.is_empty());
        assert_eq!(*resets.lock(), 2);
    }

    #[test]
    fn test_modify() {
        let model = letters();
        let changed = Arc::new(Mutex::new(Vec::new()));

        let recv = changed.clone();
        model.signals().data_changed.connect(move |(first, last)| {
            recv.lock().push((*first, *last));
        });

        assert_eq!(model.modify(2, |item| item.push('!')), Some(()));
        assert_eq!(model.modify(9, |item| item.push('!')), None);

        assert_eq!(model.get(2).as_deref(), Some("C!"));
        assert_eq!(*changed.lock(), vec![(2, 2)]);
    }

    #[test]
    fn test_position_and_with_item() {
        let model = letters();
        assert_eq!(model.position(|item| item == "C"), Some(2));
        assert_eq!(model.with_item(1, |item| item.len()), Some(1));
        assert_eq!(model.with_item(5, |item| item.len()), None);
    }
}
