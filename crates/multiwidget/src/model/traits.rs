//! Core traits for the list models.
//!
//! Views attach to a model through [`ItemModel`] and stay synchronized by
//! connecting to its [`ModelSignals`].

use multiwidget_core::Signal;

/// The trait list models implement so views can attach to them.
///
/// Both the top-level element list and each button's nested field list are
/// flat, single-column models, so rows are addressed by plain `usize`
/// positions.
pub trait ItemModel: Send + Sync {
    /// Returns the number of rows in the model.
    fn row_count(&self) -> usize;

    /// Returns the signals for this model.
    fn signals(&self) -> &ModelSignals;

    /// Returns `true` if the model has no rows.
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// Collection of signals emitted by list models.
///
/// # Signal Usage
///
/// - **Before modifications**: `rows_about_to_be_*`
/// - **After modifications**: `rows_*`
/// - **Value changes**: `data_changed`
/// - **Full refresh**: `model_about_to_reset` / `model_reset`
///
/// Row arguments are `(first, last)`, both inclusive.
#[derive(Debug, Default)]
pub struct ModelSignals {
    /// Emitted just before rows are inserted.
    pub rows_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted.
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted just before rows are removed.
    pub rows_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after rows have been removed.
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted when values in existing rows change.
    pub data_changed: Signal<(usize, usize)>,

    /// Emitted before the model contents are replaced wholesale.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the model contents have been replaced wholesale.
    pub model_reset: Signal<()>,
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits signals for row insertion.
    ///
    /// Calls the provided function between the about_to_be_inserted and inserted signals.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted.emit((first, last));
        insert_fn();
        self.rows_inserted.emit((first, last));
    }

    /// Emits signals for row removal.
    ///
    /// Calls the provided function between the about_to_be_removed and removed signals.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_removed.emit((first, last));
        remove_fn();
        self.rows_removed.emit((first, last));
    }

    /// Emits the data_changed signal for a single row.
    pub fn emit_data_changed_single(&self, row: usize) {
        self.data_changed.emit((row, row));
    }

    /// Emits signals for a model reset.
    ///
    /// Calls the provided function between the about_to_reset and reset signals.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}
