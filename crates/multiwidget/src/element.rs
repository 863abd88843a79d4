//! Element records.
//!
//! An [`Element`] is one configurable row of the multi widget. The record
//! holds what the model owns (kind, tag, the button's field list and icon);
//! the values typed into the row's inputs live on the bound [`RowView`].

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use multiwidget_core::Property;
use serde::{Deserialize, Serialize};

use crate::field::FieldListModel;
use crate::row::RowHandle;

static TAG_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_tag() -> String {
    format!("element-{}", TAG_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// The kind of an element, which selects the form a row renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Calls a service when tapped.
    Button,
    /// Shows fixed text.
    Plaintext,
    /// Shows rendered template text.
    Template,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Button => "button",
            ElementKind::Plaintext => "plaintext",
            ElementKind::Template => "template",
        };
        f.write_str(name)
    }
}

/// Model data owned by a button element.
#[derive(Debug, Clone)]
pub struct ButtonElement {
    fields: Arc<FieldListModel>,
    icon: Arc<Property<Option<u32>>>,
}

impl ButtonElement {
    fn new() -> Self {
        Self {
            fields: Arc::new(FieldListModel::empty()),
            icon: Arc::new(Property::new(None)),
        }
    }

    /// The derived and custom field bindings.
    pub fn fields(&self) -> &Arc<FieldListModel> {
        &self.fields
    }

    /// The icon chosen in the icon picker.
    pub fn icon(&self) -> Option<u32> {
        self.icon.get()
    }

    pub(crate) fn set_icon(&self, icon_id: u32) {
        self.icon.set_silent(Some(icon_id));
    }
}

/// Kind-specific element data.
#[derive(Debug, Clone)]
pub enum ElementBody {
    /// A service call button with its fields and icon.
    Button(ButtonElement),
    /// Fixed text; all values live on the row.
    Plaintext,
    /// Template text; all values live on the row.
    Template,
}

/// One configurable element of the widget.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    row: Arc<Property<Option<RowHandle>>>,
    body: ElementBody,
}

impl Element {
    /// Creates a new, unbound element of `kind` with a fresh tag.
    pub fn new(kind: ElementKind) -> Self {
        let body = match kind {
            ElementKind::Button => ElementBody::Button(ButtonElement::new()),
            ElementKind::Plaintext => ElementBody::Plaintext,
            ElementKind::Template => ElementBody::Template,
        };
        Self {
            tag: next_tag(),
            row: Arc::new(Property::new(None)),
            body,
        }
    }

    /// The element kind.
    pub fn kind(&self) -> ElementKind {
        match self.body {
            ElementBody::Button(_) => ElementKind::Button,
            ElementBody::Plaintext => ElementKind::Plaintext,
            ElementBody::Template => ElementKind::Template,
        }
    }

    /// The tag correlating this element with the icon picker.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Kind-specific data.
    pub fn body(&self) -> &ElementBody {
        &self.body
    }

    /// Returns the button data, if this is a button element.
    pub fn as_button(&self) -> Option<&ButtonElement> {
        match &self.body {
            ElementBody::Button(button) => Some(button),
            _ => None,
        }
    }

    /// The row currently bound to this element.
    pub fn row(&self) -> Option<RowHandle> {
        self.row.get()
    }

    pub(crate) fn set_row(&self, row: RowHandle) {
        self.row.set_silent(Some(row));
    }

    /// Forgets `row` if it is the row bound to this element.
    pub(crate) fn release_row(&self, row: &RowHandle) {
        let bound = self.row.with(|current| current.as_ref().is_some_and(|r| Arc::ptr_eq(r, row)));
        if bound {
            self.row.set_silent(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unique() {
        let a = Element::new(ElementKind::Button);
        let b = Element::new(ElementKind::Button);
        assert_ne!(a.tag(), b.tag());
        assert!(a.tag().starts_with("element-"));
    }

    #[test]
    fn test_kind_and_body() {
        let button = Element::new(ElementKind::Button);
        assert_eq!(button.kind(), ElementKind::Button);
        assert!(button.as_button().unwrap().fields().is_empty());
        assert_eq!(button.as_button().unwrap().icon(), None);

        let template = Element::new(ElementKind::Template);
        assert_eq!(template.kind(), ElementKind::Template);
        assert!(template.as_button().is_none());
        assert!(template.row().is_none());
    }

    #[test]
    fn test_clones_share_button_state() {
        let element = Element::new(ElementKind::Button);
        let copy = element.clone();
        copy.as_button().unwrap().set_icon(42);
        assert_eq!(element.as_button().unwrap().icon(), Some(42));
        assert_eq!(copy.tag(), element.tag());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ElementKind::Plaintext.to_string(), "plaintext");
    }
}
