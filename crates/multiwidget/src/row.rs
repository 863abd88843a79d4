//! Row view handles.
//!
//! A [`RowView`] is the projection of one element into live input controls.
//! It is created unbound by [`create_row`] and wired to an element by the
//! controller's `bind_row`. The controls are headless: they hold their
//! current value and emit a signal when the user changes it, and a real
//! toolkit drives them through the same methods.

use std::fmt;
use std::sync::Arc;

use multiwidget_core::{Property, Signal};

use crate::element::ElementKind;
use crate::field::FieldListModel;
use crate::settings::ListSettings;

/// Shared handle to a row view.
pub type RowHandle = Arc<RowView>;

/// A single-line text input.
#[derive(Debug, Default)]
pub struct TextInput {
    text: Property<String>,
    /// Emitted with the new text on every edit.
    pub text_changed: Signal<String>,
}

impl TextInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// Replaces the text and emits `text_changed`.
    ///
    /// Every call is an edit, so re-entering or re-picking the current text
    /// emits again.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.text.set_silent(text.clone());
        self.text_changed.emit(text);
    }

    fn disconnect_all(&self) {
        self.text_changed.disconnect_all();
    }
}

/// A clickable control.
#[derive(Debug, Default)]
pub struct PushButton {
    /// Emitted when the button is activated.
    pub clicked: Signal<()>,
}

impl PushButton {
    /// Creates a button with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates the button.
    pub fn click(&self) {
        self.clicked.emit(());
    }
}

/// A drop-down choice between fixed options.
#[derive(Debug)]
pub struct Choice {
    options: Vec<String>,
    current: Property<usize>,
    /// Emitted with the new index when the selection changes.
    pub current_changed: Signal<usize>,
}

impl Choice {
    /// Creates a choice over `options` with `current` selected.
    ///
    /// An out-of-range `current` selects the first option.
    pub fn new(options: Vec<String>, current: usize) -> Self {
        let current = if current < options.len() { current } else { 0 };
        Self {
            options,
            current: Property::new(current),
            current_changed: Signal::new(),
        }
    }

    /// The available options.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the selected option.
    pub fn current_index(&self) -> usize {
        self.current.get()
    }

    /// Text of the selected option, or an empty string when there are none.
    pub fn current_text(&self) -> String {
        self.options
            .get(self.current_index())
            .cloned()
            .unwrap_or_default()
    }

    /// Selects the option at `index`. Returns `false` if it is out of range.
    pub fn set_current_index(&self, index: usize) -> bool {
        if index >= self.options.len() {
            return false;
        }
        if self.current.set(index) {
            self.current_changed.emit(index);
        }
        true
    }

    fn disconnect_all(&self) {
        self.current_changed.disconnect_all();
    }
}

/// Display target for rendered template text.
///
/// Clones share the same text, so a renderer that completes after its row
/// was removed writes into a target nobody displays any more.
#[derive(Debug, Clone, Default)]
pub struct RenderTarget {
    text: Arc<Property<String>>,
}

impl RenderTarget {
    /// Creates an empty target.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered text.
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// Shows rendered text.
    pub fn set_text(&self, text: impl Into<String>) {
        self.text.set_silent(text.into());
    }

    /// Returns `true` if both handles display the same text slot.
    pub fn ptr_eq(&self, other: &RenderTarget) -> bool {
        Arc::ptr_eq(&self.text, &other.text)
    }
}

/// Controls of a button row.
#[derive(Debug)]
pub struct ButtonRow {
    /// Removes the element from the list.
    pub remove: PushButton,
    /// Service name, e.g. `light.turn_on`.
    pub service: TextInput,
    /// Label shown under the icon.
    pub label: TextInput,
    /// Opens the icon picker.
    pub icon_selector: PushButton,
    icon: Property<Option<u32>>,
    /// Prompts for a custom field.
    pub add_field: PushButton,
    fields: Property<Option<Arc<FieldListModel>>>,
}

impl ButtonRow {
    fn new() -> Self {
        Self {
            remove: PushButton::new(),
            service: TextInput::new(),
            label: TextInput::new(),
            icon_selector: PushButton::new(),
            icon: Property::new(None),
            add_field: PushButton::new(),
            fields: Property::new(None),
        }
    }

    /// The icon shown on the selector.
    pub fn icon(&self) -> Option<u32> {
        self.icon.get()
    }

    pub(crate) fn set_icon(&self, icon_id: Option<u32>) {
        self.icon.set_silent(icon_id);
    }

    /// The field list the nested view renders, once bound.
    pub fn fields(&self) -> Option<Arc<FieldListModel>> {
        self.fields.get()
    }

    pub(crate) fn set_fields(&self, fields: Arc<FieldListModel>) {
        self.fields.set_silent(Some(fields));
    }
}

/// Controls of a plaintext row.
#[derive(Debug)]
pub struct PlaintextRow {
    /// Removes the element from the list.
    pub remove: PushButton,
    /// The label text.
    pub text: TextInput,
    /// Label text size.
    pub text_size: Choice,
}

/// Controls of a template row.
#[derive(Debug)]
pub struct TemplateRow {
    /// Removes the element from the list.
    pub remove: PushButton,
    /// The template source.
    pub template: TextInput,
    /// Where the rendered preview is shown.
    pub render: RenderTarget,
    /// Rendered text size.
    pub text_size: Choice,
}

/// The form for one element, by kind.
pub enum RowView {
    /// Inputs for a button element.
    Button(ButtonRow),
    /// Inputs for a plaintext element.
    Plaintext(PlaintextRow),
    /// Inputs for a template element.
    Template(TemplateRow),
}

impl RowView {
    /// The element kind this row renders.
    pub fn kind(&self) -> ElementKind {
        match self {
            RowView::Button(_) => ElementKind::Button,
            RowView::Plaintext(_) => ElementKind::Plaintext,
            RowView::Template(_) => ElementKind::Template,
        }
    }

    /// The removal control every row carries.
    pub fn remove_button(&self) -> &PushButton {
        match self {
            RowView::Button(row) => &row.remove,
            RowView::Plaintext(row) => &row.remove,
            RowView::Template(row) => &row.remove,
        }
    }

    /// Returns the button controls, if this is a button row.
    pub fn as_button(&self) -> Option<&ButtonRow> {
        match self {
            RowView::Button(row) => Some(row),
            _ => None,
        }
    }

    /// Returns the plaintext controls, if this is a plaintext row.
    pub fn as_plaintext(&self) -> Option<&PlaintextRow> {
        match self {
            RowView::Plaintext(row) => Some(row),
            _ => None,
        }
    }

    /// Returns the template controls, if this is a template row.
    pub fn as_template(&self) -> Option<&TemplateRow> {
        match self {
            RowView::Template(row) => Some(row),
            _ => None,
        }
    }

    /// Drops every slot connected to this row's controls.
    pub fn unbind(&self) {
        self.remove_button().clicked.disconnect_all();
        match self {
            RowView::Button(row) => {
                row.service.disconnect_all();
                row.label.disconnect_all();
                row.icon_selector.clicked.disconnect_all();
                row.add_field.clicked.disconnect_all();
            }
            RowView::Plaintext(row) => {
                row.text.disconnect_all();
                row.text_size.disconnect_all();
            }
            RowView::Template(row) => {
                row.template.disconnect_all();
                row.text_size.disconnect_all();
            }
        }
    }
}

impl fmt::Debug for RowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowView::Button(row) => f.debug_tuple("Button").field(row).finish(),
            RowView::Plaintext(row) => f.debug_tuple("Plaintext").field(row).finish(),
            RowView::Template(row) => f.debug_tuple("Template").field(row).finish(),
        }
    }
}

/// Creates a fresh, unbound row for `kind`.
pub fn create_row(kind: ElementKind, settings: &ListSettings) -> RowHandle {
    let text_size = || Choice::new(settings.text_sizes.clone(), settings.default_text_size);
    let row = match kind {
        ElementKind::Button => RowView::Button(ButtonRow::new()),
        ElementKind::Plaintext => RowView::Plaintext(PlaintextRow {
            remove: PushButton::new(),
            text: TextInput::new(),
            text_size: text_size(),
        }),
        ElementKind::Template => RowView::Template(TemplateRow {
            remove: PushButton::new(),
            template: TextInput::new(),
            render: RenderTarget::new(),
            text_size: text_size(),
        }),
    };
    Arc::new(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_text_input_emits_on_every_edit() {
        let input = TextInput::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let recv = seen.clone();
        input.text_changed.connect(move |text| recv.lock().push(text.clone()));

        input.set_text("light");
        input.set_text("light");
        input.set_text("light.turn_on");

        assert_eq!(*seen.lock(), vec!["light", "light", "light.turn_on"]);
        assert_eq!(input.text(), "light.turn_on");
    }

    #[test]
    fn test_choice_bounds() {
        let choice = Choice::new(vec!["30".into(), "20".into()], 5);
        assert_eq!(choice.current_index(), 0);

        assert!(choice.set_current_index(1));
        assert_eq!(choice.current_text(), "20");
        assert!(!choice.set_current_index(2));
        assert_eq!(choice.current_index(), 1);
    }

    #[test]
    fn test_render_target_clones_share_text() {
        let target = RenderTarget::new();
        let handle = target.clone();
        handle.set_text("21.5 °C");
        assert_eq!(target.text(), "21.5 °C");
        assert!(target.ptr_eq(&handle));
        assert!(!target.ptr_eq(&RenderTarget::new()));
    }

    #[test]
    fn test_create_row_per_kind() {
        let settings = ListSettings::default();
        for kind in [ElementKind::Button, ElementKind::Plaintext, ElementKind::Template] {
            assert_eq!(create_row(kind, &settings).kind(), kind);
        }

        let row = create_row(ElementKind::Plaintext, &settings);
        let plaintext = row.as_plaintext().unwrap();
        assert_eq!(plaintext.text_size.current_text(), settings.default_text_size());
        assert!(row.as_button().is_none());
    }

    #[test]
    fn test_unbind_drops_connections() {
        let row = create_row(ElementKind::Button, &ListSettings::default());
        let button = row.as_button().unwrap();
        row.remove_button().clicked.connect(|_| {});
        button.service.text_changed.connect(|_| {});
        button.add_field.clicked.connect(|_| {});

        row.unbind();

        assert_eq!(row.remove_button().clicked.connection_count(), 0);
        assert_eq!(button.service.text_changed.connection_count(), 0);
        assert_eq!(button.add_field.clicked.connection_count(), 0);
    }
}
