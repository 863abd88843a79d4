//! Field bindings for service-backed button elements.
//!
//! A [`FieldBinding`] is one key/value input for a parameter of the
//! selected service call. Each button element owns a [`FieldListModel`]
//! with its bindings; the nested field view renders that model.

use serde::{Deserialize, Serialize};

use crate::catalog::{EntityCatalog, entity_domain};
use crate::model::ListModel;

/// Field key that receives entity suggestions.
pub const ENTITY_ID_KEY: &str = "entity_id";

/// One dynamic input row for a service field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    /// The service the field belongs to, as typed when it was created.
    pub service: String,
    /// The field key.
    pub key: String,
    /// The value entered (or pre-filled) for the field.
    pub value: Option<String>,
}

impl FieldBinding {
    /// Creates a binding with no value.
    pub fn new(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            key: key.into(),
            value: None,
        }
    }

    /// Creates a binding with a pre-filled value.
    pub fn with_value(
        service: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// The field list of one button element.
pub type FieldListModel = ListModel<FieldBinding>;

impl ListModel<FieldBinding> {
    /// Appends a user-entered field after everything already in the list.
    pub fn append_custom(&self, service: &str, key: &str) -> usize {
        self.push(FieldBinding::new(service, key))
    }

    /// Sets the value of the field at `row`.
    ///
    /// An empty string clears the value. Returns `false` if `row` is out of
    /// range.
    pub fn set_value(&self, row: usize, value: &str) -> bool {
        let value = (!value.is_empty()).then(|| value.to_string());
        self.modify(row, |binding| binding.value = value).is_some()
    }

    /// Returns the field keys in list order.
    pub fn keys(&self) -> Vec<String> {
        self.items().iter().map(|binding| binding.key.clone()).collect()
    }

    /// Value suggestions for the field at `row`.
    ///
    /// Only `entity_id` fields get suggestions: the ids of entities in the
    /// same domain as the field's service.
    pub fn entity_suggestions(&self, row: usize, entities: &EntityCatalog) -> Vec<String> {
        self.with_item(row, |binding| {
            if binding.key != ENTITY_ID_KEY {
                return Vec::new();
            }
            entities
                .ids_in_domain(entity_domain(&binding.service))
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Entity;
    use crate::model::ItemModel;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_append_custom_goes_last() {
        let fields = FieldListModel::new(vec![
            FieldBinding::new("light.turn_on", "entity_id"),
            FieldBinding::new("light.turn_on", "brightness"),
        ]);

        assert_eq!(fields.append_custom("light.turn_on", "transition"), 2);
        assert_eq!(fields.keys(), vec!["entity_id", "brightness", "transition"]);
        assert_eq!(fields.get(2).unwrap().value, None);
    }

    #[test]
    fn test_set_value_emits_data_changed() {
        let fields = FieldListModel::new(vec![FieldBinding::new("light.turn_on", "brightness")]);
        let changed = Arc::new(Mutex::new(Vec::new()));

        let recv = changed.clone();
        fields.signals().data_changed.connect(move |rows| {
            recv.lock().push(*rows);
        });

        assert!(fields.set_value(0, "200"));
        assert_eq!(fields.get(0).unwrap().value.as_deref(), Some("200"));

        assert!(fields.set_value(0, ""));
        assert_eq!(fields.get(0).unwrap().value, None);

        assert!(!fields.set_value(3, "1"));
        assert_eq!(*changed.lock(), vec![(0, 0), (0, 0)]);
    }

    #[test]
    fn test_entity_suggestions() {
        let entities = EntityCatalog::from_entities([
            Entity::new("light.kitchen", "on"),
            Entity::new("light.hall", "off"),
            Entity::new("switch.fan", "on"),
        ]);
        let fields = FieldListModel::new(vec![
            FieldBinding::new("light.turn_on", "entity_id"),
            FieldBinding::new("light.turn_on", "brightness"),
        ]);

        assert_eq!(
            fields.entity_suggestions(0, &entities),
            vec!["light.hall", "light.kitchen"]
        );
        assert!(fields.entity_suggestions(1, &entities).is_empty());
        assert!(fields.entity_suggestions(9, &entities).is_empty());
    }
}
