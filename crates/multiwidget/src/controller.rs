//! The element list controller.
//!
//! [`ElementListController`] owns the ordered element list of the
//! configuration screen and wires row views to it. A view layer drives it
//! the same way a recycling list view drives an adapter:
//!
//! 1. `count()` and `kind_at(i)` to decide what to show,
//! 2. `create_row(kind)` to build a form,
//! 3. `bind_row(i, &row)` to attach the form to element `i`,
//! 4. the list model's signals to learn about insertions and removals.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use multiwidget::dialog::{DialogHost, InputDialog};
//! use multiwidget::row::RenderTarget;
//! use multiwidget::{
//!     ControllerContext, ElementListController, EntityCatalog, EntityFilter, ListSettings,
//!     Property, Service, ServiceCatalog,
//! };
//!
//! struct Host;
//!
//! impl DialogHost for Host {
//!     fn show_icon_picker(&self, _tag: &str) {}
//!     fn show_input_dialog(&self, _dialog: Arc<InputDialog>) {}
//! }
//!
//! let services = ServiceCatalog::from_services([
//!     Service::new("light", "turn_on").with_fields(["entity_id", "brightness"]),
//! ]);
//! let controller = ElementListController::new(ControllerContext {
//!     services: Arc::new(services),
//!     entities: Arc::new(EntityCatalog::new()),
//!     entity_filter: Arc::new(Property::new(EntityFilter::disabled())),
//!     dialogs: Arc::new(Host),
//!     render_template: Arc::new(|_text: String, _target: RenderTarget| {}),
//!     settings: ListSettings::default(),
//! });
//!
//! controller.add_button();
//! let row = controller.create_row(controller.kind_at(0));
//! controller.bind_row(0, &row);
//!
//! row.as_button().unwrap().service.set_text("light.turn_on");
//! let fields = controller.element(0).unwrap().as_button().unwrap().fields().keys();
//! assert_eq!(fields, vec!["entity_id", "brightness"]);
//! ```

use std::fmt;
use std::sync::Arc;

use multiwidget_core::Property;
use multiwidget_core::logging::targets;

use crate::catalog::{EntityCatalog, ServiceCatalog};
use crate::deriver::{EntityFilter, ServiceFieldDeriver};
use crate::dialog::{DialogHost, InputDialog};
use crate::element::{Element, ElementBody, ElementKind};
use crate::field::FieldListModel;
use crate::model::{ItemModel, ListModel, ModelSignals};
use crate::row::{RenderTarget, RowHandle, RowView, create_row};
use crate::settings::ListSettings;
use crate::snapshot::WidgetConfig;

/// Renders template text into a display target, possibly later.
///
/// The controller forwards every template edit and does not wait for the
/// result.
pub type TemplateRenderer = Arc<dyn Fn(String, RenderTarget) + Send + Sync>;

/// Everything the controller borrows from the host screen.
pub struct ControllerContext {
    /// Known services and their field schemas.
    pub services: Arc<ServiceCatalog>,
    /// Known entities, used for field value suggestions.
    pub entities: Arc<EntityCatalog>,
    /// The host's "filter by entity" state, read at derivation time.
    pub entity_filter: Arc<Property<EntityFilter>>,
    /// Presents the icon picker and the add-field prompt.
    pub dialogs: Arc<dyn DialogHost>,
    /// Renders template previews.
    pub render_template: TemplateRenderer,
    /// Presentation settings.
    pub settings: ListSettings,
}

struct ControllerInner {
    elements: ListModel<Element>,
    deriver: ServiceFieldDeriver,
    entities: Arc<EntityCatalog>,
    dialogs: Arc<dyn DialogHost>,
    render_template: TemplateRenderer,
    settings: ListSettings,
}

impl ControllerInner {
    fn remove_at(&self, index: usize) {
        match self.elements.take(index) {
            Some(element) => {
                tracing::debug!(
                    target: targets::CONTROLLER,
                    index,
                    kind = %element.kind(),
                    tag = element.tag(),
                    "element removed"
                );
                if let Some(row) = element.row() {
                    row.unbind();
                }
            }
            None => tracing::warn!(
                target: targets::CONTROLLER,
                index,
                len = self.elements.len(),
                "stale removal ignored"
            ),
        }
    }

    fn append(&self, kind: ElementKind) -> usize {
        let index = self.elements.push(Element::new(kind));
        tracing::debug!(target: targets::CONTROLLER, index, %kind, "element added");
        index
    }
}

/// Controller for the dynamic element list.
#[derive(Clone)]
pub struct ElementListController {
    inner: Arc<ControllerInner>,
}

impl ElementListController {
    /// Creates a controller with an empty element list.
    pub fn new(context: ControllerContext) -> Self {
        Self::with_elements(context, Vec::new())
    }

    /// Creates a controller over existing elements.
    pub fn with_elements(context: ControllerContext, elements: Vec<Element>) -> Self {
        let ControllerContext {
            services,
            entities,
            entity_filter,
            dialogs,
            render_template,
            settings,
        } = context;
        Self {
            inner: Arc::new(ControllerInner {
                elements: ListModel::new(elements),
                deriver: ServiceFieldDeriver::new(services, entity_filter),
                entities,
                dialogs,
                render_template,
                settings,
            }),
        }
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.inner.elements.len()
    }

    /// Kind of the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn kind_at(&self, index: usize) -> ElementKind {
        self.inner.elements.items()[index].kind()
    }

    /// A copy of the element at `index`; clones share the element's state.
    pub fn element(&self, index: usize) -> Option<Element> {
        self.inner.elements.get(index)
    }

    /// The element list model, for views that attach to its signals.
    pub fn elements(&self) -> &ListModel<Element> {
        &self.inner.elements
    }

    /// The element list's change notifications.
    pub fn signals(&self) -> &ModelSignals {
        self.inner.elements.signals()
    }

    /// The service catalog used for derivation and suggestions.
    pub fn services(&self) -> &Arc<ServiceCatalog> {
        self.inner.deriver.services()
    }

    /// The entity catalog used for value suggestions.
    pub fn entities(&self) -> &Arc<EntityCatalog> {
        &self.inner.entities
    }

    /// The presentation settings.
    pub fn settings(&self) -> &ListSettings {
        &self.inner.settings
    }

    /// Builds a fresh, unbound row for `kind`.
    pub fn create_row(&self, kind: ElementKind) -> RowHandle {
        create_row(kind, &self.inner.settings)
    }

    /// Attaches `row` to the element at `index`.
    ///
    /// Previous connections on `row` are dropped first, so a recycled row
    /// can be rebound. A row the element was bound to before is detached.
    /// A row of the wrong kind is left unbound.
    pub fn bind_row(&self, index: usize, row: &RowHandle) {
        let Some(element) = self.inner.elements.get(index) else {
            tracing::warn!(target: targets::CONTROLLER, index, "bind past end of list ignored");
            return;
        };
        if element.kind() != row.kind() {
            tracing::warn!(
                target: targets::CONTROLLER,
                index,
                element = %element.kind(),
                row = %row.kind(),
                "row kind does not match element"
            );
            return;
        }

        row.unbind();
        if let Some(previous) = element.row()
            && !Arc::ptr_eq(&previous, row)
        {
            previous.unbind();
        }
        for other in self.inner.elements.items().iter() {
            other.release_row(row);
        }
        element.set_row(row.clone());

        let weak = Arc::downgrade(&self.inner);
        row.remove_button().clicked.connect(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.remove_at(index);
            }
        });

        match (element.body(), row.as_ref()) {
            (ElementBody::Button(button), RowView::Button(_)) => {
                self.bind_button(&element, button.fields().clone(), row);
            }
            (ElementBody::Template, RowView::Template(_)) => self.bind_template(row),
            // Plaintext rows only carry the removal control and local inputs.
            _ => {}
        }
        tracing::trace!(target: targets::CONTROLLER, index, tag = element.tag(), "row bound");
    }

    fn bind_button(&self, element: &Element, fields: Arc<FieldListModel>, row: &RowHandle) {
        let Some(inputs) = row.as_button() else {
            return;
        };
        inputs.set_fields(fields.clone());
        inputs.set_icon(element.as_button().and_then(|button| button.icon()));

        let weak = Arc::downgrade(&self.inner);
        let derived_fields = fields.clone();
        inputs.service.text_changed.connect(move |text| {
            if let Some(inner) = weak.upgrade() {
                inner.deriver.apply(text, &derived_fields);
            }
        });

        let weak = Arc::downgrade(&self.inner);
        let tag = element.tag().to_string();
        inputs.icon_selector.clicked.connect(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.dialogs.show_icon_picker(&tag);
            }
        });

        let weak = Arc::downgrade(&self.inner);
        let weak_row = Arc::downgrade(row);
        inputs.add_field.clicked.connect(move |_| {
            let (Some(inner), Some(row)) = (weak.upgrade(), weak_row.upgrade()) else {
                return;
            };
            let dialog = Arc::new(InputDialog::get_text(
                inner.settings.field_dialog_title.clone(),
                inner.settings.field_dialog_label.clone(),
                "",
            ));
            let fields = fields.clone();
            let weak_row = Arc::downgrade(&row);
            dialog.text_value_selected.connect(move |key| {
                let Some(row) = weak_row.upgrade() else {
                    return;
                };
                let Some(inputs) = row.as_button() else {
                    return;
                };
                let service = inputs.service.text();
                let position = fields.append_custom(&service, key);
                tracing::debug!(
                    target: targets::CONTROLLER,
                    service = %service,
                    key = %key,
                    position,
                    "custom field added"
                );
            });
            inner.dialogs.show_input_dialog(dialog);
        });
    }

    fn bind_template(&self, row: &RowHandle) {
        let Some(inputs) = row.as_template() else {
            return;
        };
        let weak = Arc::downgrade(&self.inner);
        let target = inputs.render.clone();
        inputs.template.text_changed.connect(move |text| {
            if let Some(inner) = weak.upgrade() {
                (inner.render_template)(text.clone(), target.clone());
            }
        });
    }

    /// Appends a button element.
    pub fn add_button(&self) -> usize {
        self.inner.append(ElementKind::Button)
    }

    /// Appends a template element.
    pub fn add_template(&self) -> usize {
        self.inner.append(ElementKind::Template)
    }

    /// Appends a plaintext element.
    pub fn add_plaintext(&self) -> usize {
        self.inner.append(ElementKind::Plaintext)
    }

    /// Removes the element at `index`, as its removal control would.
    ///
    /// Out-of-range indices are ignored.
    pub fn remove(&self, index: usize) {
        self.inner.remove_at(index);
    }

    /// Applies an icon picked for the element with `tag`.
    ///
    /// Returns `false` if no button element carries that tag.
    pub fn set_icon(&self, tag: &str, icon_id: u32) -> bool {
        let Some(index) = self.inner.elements.position(|element| element.tag() == tag) else {
            return false;
        };
        let Some(element) = self.inner.elements.get(index) else {
            return false;
        };
        let Some(button) = element.as_button() else {
            return false;
        };

        button.set_icon(icon_id);
        if let Some(row) = element.row()
            && let Some(inputs) = row.as_button()
        {
            inputs.set_icon(Some(icon_id));
        }
        self.inner.elements.signals().emit_data_changed_single(index);
        tracing::debug!(target: targets::CONTROLLER, tag, icon_id, "icon selected");
        true
    }

    /// Entity suggestions for field `field_row` of the button at `index`.
    pub fn entity_suggestions(&self, index: usize, field_row: usize) -> Vec<String> {
        self.inner
            .elements
            .with_item(index, |element| {
                element
                    .as_button()
                    .map(|button| button.fields().entity_suggestions(field_row, &self.inner.entities))
            })
            .flatten()
            .unwrap_or_default()
    }

    /// Captures the current values of every element for saving.
    pub fn snapshot(&self) -> WidgetConfig {
        WidgetConfig::capture(
            self.inner.elements.items().iter(),
            self.inner.settings.default_text_size(),
        )
    }
}

impl fmt::Debug for ElementListController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementListController")
            .field("elements", &self.inner.elements)
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}
