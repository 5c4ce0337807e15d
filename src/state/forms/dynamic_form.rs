//! Dynamic form controller: schema + state + persistence slot + focus

use super::field::FieldInput;
use super::form_state::FormState;
use super::persistence::{SnapshotStore, StoreError};
use super::schema::{FieldDescriptor, FormSchema};
use super::submission::{self, Committed, SubmitError};

/// Storage slot for the sign-up form. Bump the version when the schema
/// changes incompatibly.
pub const DEFAULT_FORM_KEY: &str = "signup_form_v1";

/// Buttons on the actions row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Save,
    Reset,
}

impl FormButton {
    pub const ALL: [FormButton; 2] = [FormButton::Save, FormButton::Reset];

    pub fn label(self) -> &'static str {
        match self {
            Self::Save => "Save",
            Self::Reset => "Reset",
        }
    }
}

/// Trait for common form focus operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// One rendered form bound to a persistence slot
pub struct DynamicForm {
    schema: FormSchema,
    key: String,
    store: Box<dyn SnapshotStore>,
    state: FormState,
    /// Focused row; `schema.len()` is the actions row
    pub active_field_index: usize,
    pub selected_button: usize,
    last_committed: Option<Committed>,
}

impl DynamicForm {
    /// Initialize defaults, then overlay whatever the store holds for `key`
    pub fn mount(schema: FormSchema, key: impl Into<String>, store: Box<dyn SnapshotStore>) -> Self {
        let key = key.into();
        let mut state = FormState::initialize(&schema);
        if let Some(snapshot) = store.load(&key) {
            tracing::debug!("Restoring {} saved value(s) for '{key}'", snapshot.len());
            state.overlay(&schema, &snapshot);
        }

        Self {
            schema,
            key,
            store,
            state,
            active_field_index: 0,
            selected_button: 0,
            last_committed: None,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn last_committed(&self) -> Option<&Committed> {
        self.last_committed.as_ref()
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.state.set_value(name, value)
    }

    /// Descriptor of the focused field, `None` on the actions row
    pub fn active_descriptor(&self) -> Option<&FieldDescriptor> {
        self.schema.fields().get(self.active_field_index)
    }

    /// Route an editing input to the focused field
    pub fn handle_input(&mut self, input: FieldInput) -> bool {
        let Some(field) = self.schema.fields().get(self.active_field_index) else {
            return false;
        };
        let name = field.name.clone();
        let next = field.apply_input(self.state.value(&name), input);
        match next {
            Some(next) => self.set_value(&name, next),
            None => false,
        }
    }

    /// Overlay values from untyped JSON (e.g. a pasted snapshot).
    /// Returns `false` and keeps the current values when it is malformed.
    pub fn overlay_json(&mut self, snapshot: &serde_json::Value) -> bool {
        self.state.overlay_json(&self.schema, snapshot)
    }

    /// Back to schema defaults and drop the stored snapshot
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.state.reset(&self.schema);
        self.last_committed = None;
        self.store.clear(&self.key)
    }

    pub fn submit(&mut self) -> Result<Committed, SubmitError> {
        let committed =
            submission::submit(&self.schema, &mut self.state, self.store.as_ref(), &self.key)?;
        self.last_committed = Some(committed.clone());
        Ok(committed)
    }

    pub fn is_submittable(&self) -> bool {
        self.state.is_submittable(&self.schema)
    }

    /// Returns true if the actions row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.schema.len()
    }

    pub fn selected_form_button(&self) -> FormButton {
        FormButton::ALL[self.selected_button % FormButton::ALL.len()]
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % FormButton::ALL.len();
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = FormButton::ALL.len() - 1;
        } else {
            self.selected_button -= 1;
        }
    }
}

impl Form for DynamicForm {
    fn field_count(&self) -> usize {
        self.schema.len() + 1 // fields + actions row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.schema.len());
    }
}
