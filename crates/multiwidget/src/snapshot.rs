//! Serializable configuration snapshots.
//!
//! The host's save action reads the element list through
//! [`WidgetConfig::capture`], which pulls the typed values out of each
//! bound row. Elements that were never bound contribute empty values.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementBody};
use crate::field::FieldBinding;

/// One service field in a saved button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// The field key.
    pub key: String,
    /// The entered value, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
}

impl From<&FieldBinding> for FieldConfig {
    fn from(binding: &FieldBinding) -> Self {
        Self {
            key: binding.key.clone(),
            value: binding.value.clone(),
        }
    }
}

/// One saved element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementConfig {
    Button {
        tag: String,
        service: String,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        icon: Option<u32>,
        fields: Vec<FieldConfig>,
    },
    Plaintext {
        tag: String,
        text: String,
        text_size: String,
    },
    Template {
        tag: String,
        template: String,
        text_size: String,
    },
}

impl ElementConfig {
    /// Captures one element from its bound row.
    pub fn capture(element: &Element, default_text_size: &str) -> Self {
        let tag = element.tag().to_string();
        let row = element.row();
        match element.body() {
            ElementBody::Button(button) => {
                let inputs = row.as_deref().and_then(|row| row.as_button());
                ElementConfig::Button {
                    tag,
                    service: inputs.map(|b| b.service.text()).unwrap_or_default(),
                    label: inputs.map(|b| b.label.text()).unwrap_or_default(),
                    icon: button.icon(),
                    fields: button.fields().items().iter().map(FieldConfig::from).collect(),
                }
            }
            ElementBody::Plaintext => {
                let inputs = row.as_deref().and_then(|row| row.as_plaintext());
                ElementConfig::Plaintext {
                    tag,
                    text: inputs.map(|p| p.text.text()).unwrap_or_default(),
                    text_size: inputs
                        .map(|p| p.text_size.current_text())
                        .unwrap_or_else(|| default_text_size.to_string()),
                }
            }
            ElementBody::Template => {
                let inputs = row.as_deref().and_then(|row| row.as_template());
                ElementConfig::Template {
                    tag,
                    template: inputs.map(|t| t.template.text()).unwrap_or_default(),
                    text_size: inputs
                        .map(|t| t.text_size.current_text())
                        .unwrap_or_else(|| default_text_size.to_string()),
                }
            }
        }
    }
}

/// The whole element list, ready to be saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Elements in list order.
    pub elements: Vec<ElementConfig>,
}

impl WidgetConfig {
    /// Captures every element in order.
    pub fn capture<'a, I>(elements: I, default_text_size: &str) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
    {
        Self {
            elements: elements
                .into_iter()
                .map(|element| ElementConfig::capture(element, default_text_size))
                .collect(),
        }
    }

    /// Serializes the configuration as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::row::create_row;
    use crate::settings::ListSettings;

    #[test]
    fn test_unbound_elements_capture_defaults() {
        let elements = [
            Element::new(ElementKind::Button),
            Element::new(ElementKind::Plaintext),
        ];
        let config = WidgetConfig::capture(&elements, "30");

        match &config.elements[0] {
            ElementConfig::Button { service, fields, icon, .. } => {
                assert!(service.is_empty());
                assert!(fields.is_empty());
                assert!(icon.is_none());
            }
            other => panic!("expected button, got {other:?}"),
        }
        match &config.elements[1] {
            ElementConfig::Plaintext { text_size, .. } => assert_eq!(text_size, "30"),
            other => panic!("expected plaintext, got {other:?}"),
        }
    }

    #[test]
    fn test_capture_reads_row_inputs() {
        let settings = ListSettings::default();
        let element = Element::new(ElementKind::Template);
        let row = create_row(ElementKind::Template, &settings);
        element.set_row(row.clone());

        let inputs = row.as_template().unwrap();
        inputs.template.set_text("{{ states('sensor.outside') }}");
        inputs.text_size.set_current_index(2);

        assert_eq!(
            ElementConfig::capture(&element, settings.default_text_size()),
            ElementConfig::Template {
                tag: element.tag().to_string(),
                template: "{{ states('sensor.outside') }}".to_string(),
                text_size: "15".to_string(),
            }
        );
    }

    #[test]
    fn test_json_shape() {
        let config = WidgetConfig {
            elements: vec![ElementConfig::Button {
                tag: "element-1".into(),
                service: "light.toggle".into(),
                label: "Lamp".into(),
                icon: None,
                fields: vec![FieldConfig {
                    key: "entity_id".into(),
                    value: Some("light.lamp".into()),
                }],
            }],
        };
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(json["elements"][0]["type"], "button");
        assert_eq!(json["elements"][0]["fields"][0]["value"], "light.lamp");
        assert!(json["elements"][0].get("icon").is_none());
    }
}
