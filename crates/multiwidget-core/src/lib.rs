//! Core systems for the multi-widget configurator.
//!
//! This crate provides the small reactive foundation the configuration
//! models are built on:
//!
//! - **Signal/Slot System**: Type-safe change notification between the
//!   models and whatever view layer is attached to them
//! - **Property System**: Shared values with change detection, used for
//!   live input controls and host-owned state
//! - **Logging**: `tracing` target names for filtering by subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use multiwidget_core::Signal;
//!
//! let rows_inserted = Signal::<(usize, usize)>::new();
//!
//! rows_inserted.connect(|(first, last)| {
//!     println!("rows {first}..={last} inserted");
//! });
//!
//! rows_inserted.emit((0, 0));
//! rows_inserted.disconnect_all();
//! ```
//!
//! # Property Example
//!
//! ```
//! use multiwidget_core::{Property, Signal};
//!
//! struct TextInput {
//!     text: Property<String>,
//!     text_changed: Signal<String>,
//! }
//!
//! impl TextInput {
//!     fn set_text(&self, text: &str) {
//!         if self.text.set(text.to_string()) {
//!             self.text_changed.emit(text.to_string());
//!         }
//!     }
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionId, Signal};

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
static_assertions::assert_impl_all!(Property<String>: Send, Sync);
