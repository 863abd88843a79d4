//! Service field derivation.
//!
//! Whenever the service text of a button row changes, the row's field list
//! is rebuilt from the selected service's field schema:
//!
//! 1. If the text exactly names a catalog service, the list is cleared and
//!    refilled with one binding per field key. Keys are processed in
//!    ascending order; keys containing `_id` are inserted at the front,
//!    others appended. With several id keys the last processed one ends up
//!    first.
//! 2. Otherwise a non-empty list is cleared and an empty one left alone.
//!
//! When the host's entity filter is enabled, the first id key processed is
//! pre-filled with the filter's entity id.

use std::sync::Arc;

use multiwidget_core::Property;
use multiwidget_core::logging::targets;

use crate::catalog::ServiceCatalog;
use crate::field::{FieldBinding, FieldListModel};
use crate::model::ItemModel;

/// Substring that marks a field key as an identifier.
pub const ID_MARKER: &str = "_id";

/// Snapshot of the host's "filter by entity" toggle and entity id text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFilter {
    /// Whether the toggle is on.
    pub enabled: bool,
    /// The entity id text next to the toggle.
    pub entity_id: String,
}

impl EntityFilter {
    /// A filter that is switched on for `entity_id`.
    pub fn enabled(entity_id: impl Into<String>) -> Self {
        Self {
            enabled: true,
            entity_id: entity_id.into(),
        }
    }

    /// A filter that is switched off.
    pub fn disabled() -> Self {
        Self::default()
    }
}

/// Builds the ordered field bindings for `service` from its field keys.
pub fn derive_fields<'a, I>(service: &str, keys: I, filter: &EntityFilter) -> Vec<FieldBinding>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut keys: Vec<&str> = keys.into_iter().collect();
    keys.sort_unstable();

    let mut prefill = filter.enabled.then_some(filter.entity_id.as_str());
    let mut fields = Vec::with_capacity(keys.len());
    for key in keys {
        if key.contains(ID_MARKER) {
            let binding = match prefill.take() {
                Some(entity_id) => FieldBinding::with_value(service, key, entity_id),
                None => FieldBinding::new(service, key),
            };
            fields.insert(0, binding);
        } else {
            fields.push(FieldBinding::new(service, key));
        }
    }
    fields
}

/// What a derivation pass did to the field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeriveOutcome {
    /// The text named a service; the list now holds this many fields.
    Populated(usize),
    /// The text named no service and the stale fields were removed.
    Cleared,
    /// The text named no service and the list was already empty. The
    /// view is still told to refresh.
    Unchanged,
}

/// Keeps a field list in sync with the service text of its row.
#[derive(Debug, Clone)]
pub struct ServiceFieldDeriver {
    services: Arc<ServiceCatalog>,
    entity_filter: Arc<Property<EntityFilter>>,
}

impl ServiceFieldDeriver {
    /// Creates a deriver over the shared catalog and host filter state.
    pub fn new(services: Arc<ServiceCatalog>, entity_filter: Arc<Property<EntityFilter>>) -> Self {
        Self {
            services,
            entity_filter,
        }
    }

    /// The service catalog used for lookups.
    pub fn services(&self) -> &Arc<ServiceCatalog> {
        &self.services
    }

    /// Applies one derivation pass for `service_text` to `fields`.
    ///
    /// A populated list is replaced wholesale, so an attached view sees a
    /// single reset even when the same service is selected twice. Every pass
    /// ends in exactly one reset notification.
    pub fn apply(&self, service_text: &str, fields: &FieldListModel) -> DeriveOutcome {
        match self.services.get(service_text) {
            Some(service) => {
                let filter = self.entity_filter.get();
                let derived = derive_fields(service_text, service.field_keys(), &filter);
                let count = derived.len();
                tracing::debug!(
                    target: targets::DERIVER,
                    service = service_text,
                    fields = count,
                    prefill = filter.enabled,
                    "valid service, rebuilding dynamic fields"
                );
                fields.set_items(derived);
                DeriveOutcome::Populated(count)
            }
            None if !fields.is_empty() => {
                tracing::debug!(
                    target: targets::DERIVER,
                    service = service_text,
                    "service text no longer matches, clearing fields"
                );
                fields.clear();
                DeriveOutcome::Cleared
            }
            None => {
                // Nothing to clear, but the view still refreshes.
                fields.signals().emit_reset(|| {});
                DeriveOutcome::Unchanged
            }
        }
    }
}
