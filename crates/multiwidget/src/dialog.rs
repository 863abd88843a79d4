//! Headless dialogs and the host hooks that present them.
//!
//! The controller never draws a dialog itself. It builds an [`InputDialog`],
//! connects to its signals and hands it to the host's [`DialogHost`]; the
//! host shows it and calls [`InputDialog::accept`] or
//! [`InputDialog::reject`] once the user answers.
//!
//! ```
//! use multiwidget::dialog::InputDialog;
//!
//! let dialog = InputDialog::get_text("Field", "", "");
//! dialog.text_value_selected.connect(|key| println!("new field: {key}"));
//! dialog.set_text_value("transition");
//! dialog.accept();
//! assert!(dialog.result().is_accepted());
//! ```

use std::sync::Arc;

use multiwidget_core::{Property, Signal};

/// The outcome of a modal dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DialogResult {
    /// The dialog was rejected, or has not been answered yet.
    #[default]
    Rejected,
    /// The dialog was accepted.
    Accepted,
}

impl DialogResult {
    /// Check if the dialog was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, DialogResult::Accepted)
    }
}

/// A single-line text prompt.
#[derive(Debug)]
pub struct InputDialog {
    title: String,
    label: String,
    text_value: Property<String>,
    result: Property<DialogResult>,
    open: Property<bool>,
    /// Emitted with the entered text when the dialog is accepted.
    pub text_value_selected: Signal<String>,
    /// Emitted when the dialog is accepted.
    pub accepted: Signal<()>,
    /// Emitted when the dialog is rejected.
    pub rejected: Signal<()>,
}

impl InputDialog {
    /// Create a dialog to get a single line of text from the user.
    pub fn get_text(
        title: impl Into<String>,
        label: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            text_value: Property::new(text.into()),
            result: Property::new(DialogResult::Rejected),
            open: Property::new(true),
            text_value_selected: Signal::new(),
            accepted: Signal::new(),
            rejected: Signal::new(),
        }
    }

    /// The dialog title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The prompt label.
    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// The text currently entered.
    pub fn text_value(&self) -> String {
        self.text_value.get()
    }

    /// Replaces the entered text.
    pub fn set_text_value(&self, text: impl Into<String>) {
        self.text_value.set_silent(text.into());
    }

    /// The dialog result; `Rejected` until accepted.
    pub fn result(&self) -> DialogResult {
        self.result.get()
    }

    /// Whether the dialog is still waiting for an answer.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Accepts the dialog with the entered text.
    ///
    /// Does nothing if the dialog was already answered.
    pub fn accept(&self) {
        if !self.open.set(false) {
            return;
        }
        self.result.set(DialogResult::Accepted);
        self.text_value_selected.emit(self.text_value());
        self.accepted.emit(());
    }

    /// Rejects the dialog.
    ///
    /// Does nothing if the dialog was already answered.
    pub fn reject(&self) {
        if !self.open.set(false) {
            return;
        }
        self.result.set(DialogResult::Rejected);
        self.rejected.emit(());
    }
}

/// Hooks the host screen implements to present dialogs.
pub trait DialogHost: Send + Sync {
    /// Opens the icon picker for the element identified by `tag`.
    ///
    /// The host reports the chosen icon back through the controller's
    /// `set_icon`.
    fn show_icon_picker(&self, tag: &str);

    /// Presents a text prompt. The host answers it later.
    fn show_input_dialog(&self, dialog: Arc<InputDialog>);
}
