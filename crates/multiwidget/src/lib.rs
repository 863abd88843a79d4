//! Multi-widget configurator.
//!
//! This crate holds the list-binding logic behind the configuration screen
//! of a home-automation "multi widget": an ordered, heterogeneous list of
//! button, plaintext and template elements, each projected into a row of
//! live input controls.
//!
//! Button elements call a service. Typing a service name derives the
//! service's parameter inputs from the [`ServiceCatalog`], with identifier
//! fields promoted to the top; see [`deriver`].
//!
//! # Modules
//!
//! - [`model`]: `ListModel<T>` and its change signals
//! - [`element`]: element records
//! - [`field`]: field bindings of button elements
//! - [`deriver`]: service field derivation
//! - [`row`]: headless row views
//! - [`dialog`]: the add-field prompt and host dialog hooks
//! - [`controller`]: the element list controller
//! - [`snapshot`]: serializable configuration for saving
//! - [`catalog`], [`settings`], [`error`]: inputs and their loading

pub mod catalog;
pub mod controller;
pub mod deriver;
pub mod dialog;
pub mod element;
pub mod error;
pub mod field;
pub mod model;
pub mod row;
pub mod settings;
pub mod snapshot;

pub use multiwidget_core::logging;
pub use multiwidget_core::{ConnectionId, Property, Signal};

pub use catalog::{Entity, EntityCatalog, Service, ServiceCatalog, ServiceField};
pub use controller::{ControllerContext, ElementListController, TemplateRenderer};
pub use deriver::{DeriveOutcome, EntityFilter, ServiceFieldDeriver, derive_fields};
pub use element::{Element, ElementKind};
pub use error::{Error, Result};
pub use field::{FieldBinding, FieldListModel};
pub use settings::ListSettings;
pub use snapshot::{ElementConfig, WidgetConfig};
