//! Model layer for the element list.
//!
//! Models separate the configuration data from whatever renders it. A view
//! reads rows through [`ItemModel`] and listens to [`ModelSignals`] to stay
//! in sync:
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Model    │────>│   Signals   │────>│    View     │
//! │ (ListModel) │     │             │     │  (RowView)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The same [`ListModel`] type backs the top-level element list and the
//! nested field list of each button element.

mod list_model;
mod traits;

pub use list_model::ListModel;
pub use traits::{ItemModel, ModelSignals};
