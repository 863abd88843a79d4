//! Service and entity catalogs.
//!
//! Both catalogs are read-only lookups supplied by the host, typically
//! parsed from the home-automation server's `/api/services` and
//! `/api/states` responses. The controller shares them via `Arc`.

use std::collections::{BTreeMap, HashMap};

use multiwidget_core::logging::targets;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Schema entry for one field a service accepts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceField {
    /// Human-readable description of the field.
    pub description: Option<String>,
    /// Example value.
    pub example: Option<serde_json::Value>,
}

/// A callable service, named `domain.service`.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    domain: String,
    service: String,
    fields: BTreeMap<String, ServiceField>,
}

impl Service {
    /// Creates a service with no fields.
    pub fn new(domain: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field to the schema.
    pub fn with_field(mut self, key: impl Into<String>, field: ServiceField) -> Self {
        self.fields.insert(key.into(), field);
        self
    }

    /// Adds several fields with empty schema entries.
    pub fn with_fields<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        for key in keys {
            self.fields.insert(key.into(), ServiceField::default());
        }
        self
    }

    /// The service domain, e.g. `light`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The service name within its domain, e.g. `turn_on`.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The catalog key, `domain.service`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.domain, self.service)
    }

    /// Iterates the field keys in ascending order.
    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Looks up one field's schema entry.
    pub fn field(&self, key: &str) -> Option<&ServiceField> {
        self.fields.get(key)
    }
}

#[derive(Deserialize)]
struct RawDomain {
    domain: String,
    #[serde(default)]
    services: HashMap<String, RawService>,
}

#[derive(Deserialize)]
struct RawService {
    #[serde(default)]
    fields: HashMap<String, ServiceField>,
}

/// Read-only mapping from `domain.service` to its field schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceCatalog {
    services: BTreeMap<String, Service>,
}

impl ServiceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from a list of services.
    pub fn from_services<I>(services: I) -> Self
    where
        I: IntoIterator<Item = Service>,
    {
        let mut catalog = Self::new();
        for service in services {
            catalog.insert(service);
        }
        catalog
    }

    /// Parses the `/api/services` response shape:
    /// `[{"domain": "light", "services": {"turn_on": {"fields": {...}}}}]`.
    pub fn from_json(source: &str) -> Result<Self> {
        let domains: Vec<RawDomain> =
            serde_json::from_str(source).map_err(|err| Error::json("service catalog", err))?;

        let mut catalog = Self::new();
        for raw_domain in domains {
            for (name, raw_service) in raw_domain.services {
                let mut service = Service::new(raw_domain.domain.clone(), name);
                service.fields.extend(raw_service.fields);
                catalog.insert(service);
            }
        }
        tracing::debug!(target: targets::CATALOG, services = catalog.len(), "service catalog loaded");
        Ok(catalog)
    }

    /// Adds or replaces a service.
    pub fn insert(&mut self, service: Service) {
        self.services.insert(service.full_name(), service);
    }

    /// Returns the number of services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if the catalog has no services.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Returns `true` if `name` exactly matches a catalog key.
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Looks up a service by its exact `domain.service` name.
    pub fn get(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// Iterates all catalog keys in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Service names starting with the typed text, in ascending order.
    ///
    /// An empty prefix returns every service, which is what the drop-down
    /// shows when the service input gains focus.
    pub fn suggestions(&self, prefix: &str) -> Vec<&str> {
        self.names().filter(|name| name.starts_with(prefix)).collect()
    }
}

/// A known entity, addressed as `domain.object_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// The entity id, e.g. `light.kitchen`.
    pub entity_id: String,
    /// The last reported state.
    pub state: String,
    /// The friendly name attribute, if any.
    pub friendly_name: Option<String>,
}

impl Entity {
    /// Creates an entity with the given id and state.
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            friendly_name: None,
        }
    }

    /// Returns the domain part of the entity id.
    pub fn domain(&self) -> &str {
        entity_domain(&self.entity_id)
    }
}

/// Returns the part of an id or service name before the first `.`.
pub(crate) fn entity_domain(id: &str) -> &str {
    id.split_once('.').map_or(id, |(domain, _)| domain)
}

#[derive(Deserialize)]
struct RawState {
    entity_id: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    attributes: RawAttributes,
}

#[derive(Default, Deserialize)]
struct RawAttributes {
    friendly_name: Option<String>,
}

/// Read-only mapping from entity id to entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityCatalog {
    entities: BTreeMap<String, Entity>,
}

impl EntityCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from a list of entities.
    pub fn from_entities<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Entity>,
    {
        Self {
            entities: entities
                .into_iter()
                .map(|entity| (entity.entity_id.clone(), entity))
                .collect(),
        }
    }

    /// Parses the `/api/states` response shape:
    /// `[{"entity_id": "light.kitchen", "state": "on", "attributes": {...}}]`.
    pub fn from_json(source: &str) -> Result<Self> {
        let states: Vec<RawState> =
            serde_json::from_str(source).map_err(|err| Error::json("entity catalog", err))?;

        let catalog = Self::from_entities(states.into_iter().map(|raw| Entity {
            entity_id: raw.entity_id,
            state: raw.state,
            friendly_name: raw.attributes.friendly_name,
        }));
        tracing::debug!(target: targets::CATALOG, entities = catalog.len(), "entity catalog loaded");
        Ok(catalog)
    }

    /// Returns the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the catalog has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Looks up an entity by id.
    pub fn get(&self, entity_id: &str) -> Option<&Entity> {
        self.entities.get(entity_id)
    }

    /// Entity ids in `domain`, in ascending order.
    pub fn ids_in_domain(&self, domain: &str) -> Vec<&str> {
        self.entities
            .values()
            .filter(|entity| entity.domain() == domain)
            .map(|entity| entity.entity_id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICES_JSON: &str = r#"[
        {
            "domain": "light",
            "services": {
                "turn_on": {
                    "name": "Turn on",
                    "fields": {
                        "entity_id": {"description": "Lights to turn on"},
                        "brightness": {"example": 120}
                    }
                },
                "toggle": {}
            }
        },
        {"domain": "scene", "services": {"apply": {"fields": {}}}}
    ]"#;

    #[test]
    fn test_services_from_json() {
        let catalog = ServiceCatalog::from_json(SERVICES_JSON).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("light.turn_on"));
        assert!(!catalog.contains("light.turn_o"));

        let turn_on = catalog.get("light.turn_on").unwrap();
        assert_eq!(turn_on.domain(), "light");
        assert_eq!(
            turn_on.field_keys().collect::<Vec<_>>(),
            vec!["brightness", "entity_id"]
        );
        assert_eq!(
            turn_on.field("entity_id").unwrap().description.as_deref(),
            Some("Lights to turn on")
        );
        assert_eq!(catalog.get("light.toggle").unwrap().field_keys().count(), 0);
    }

    #[test]
    fn test_services_malformed_json() {
        let err = ServiceCatalog::from_json(r#"{"domain": "light"}"#).unwrap_err();
        assert!(matches!(err, Error::Json { what: "service catalog", .. }));
    }

    #[test]
    fn test_suggestions() {
        let catalog = ServiceCatalog::from_json(SERVICES_JSON).unwrap();
        assert_eq!(catalog.suggestions("light."), vec!["light.toggle", "light.turn_on"]);
        assert_eq!(catalog.suggestions("").len(), 3);
        assert!(catalog.suggestions("switch").is_empty());
    }

    #[test]
    fn test_entities_from_json() {
        let catalog = EntityCatalog::from_json(
            r#"[
                {"entity_id": "light.kitchen", "state": "on",
                 "attributes": {"friendly_name": "Kitchen"}},
                {"entity_id": "light.hall", "state": "off", "attributes": {}},
                {"entity_id": "switch.fan", "state": "on"}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.get("light.kitchen").unwrap().friendly_name.as_deref(),
            Some("Kitchen")
        );
        assert_eq!(catalog.ids_in_domain("light"), vec!["light.hall", "light.kitchen"]);
        assert_eq!(catalog.ids_in_domain("switch"), vec!["switch.fan"]);
    }

    #[test]
    fn test_entity_domain() {
        assert_eq!(entity_domain("light.turn_on"), "light");
        assert_eq!(entity_domain("nodot"), "nodot");
    }
}
