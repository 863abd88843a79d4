//! Reactive properties.
//!
//! A [`Property<T>`] wraps a value behind interior mutability and reports
//! whether a write actually changed it, so the owner can decide when to emit
//! its notification signal. Input controls pair a property with a signal;
//! host-owned state (such as the entity filter) is shared as
//! `Arc<Property<T>>` and read as a snapshot at the point of use.
//!
//! # Example
//!
//! ```
//! use multiwidget_core::property::Property;
//!
//! let service = Property::new(String::new());
//! assert!(service.set("light.turn_on".to_string()));
//! assert!(!service.set("light.turn_on".to_string()));
//! assert_eq!(service.get(), "light.turn_on");
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value with change detection.
///
/// `Property<T>` uses a `RwLock` internally and is `Send + Sync` when `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a copy of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller emits the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
