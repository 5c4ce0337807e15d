//! Form state: current values and per-field errors

use super::field::FieldError;
use super::persistence::{snapshot_from_value, Snapshot};
use super::schema::FormSchema;
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-field validation errors keyed by field name
pub type FieldErrors = BTreeMap<String, FieldError>;

/// Values and errors for one form instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: Snapshot,
    errors: FieldErrors,
}

impl FormState {
    /// Fresh state holding every field's default
    pub fn initialize(schema: &FormSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|f| (f.name.clone(), f.initial_value()))
            .collect();
        Self {
            values,
            errors: FieldErrors::new(),
        }
    }

    /// Replace state with defaults overlaid by `snapshot`.
    ///
    /// Fields missing from the snapshot keep their default; snapshot keys
    /// the schema does not name are ignored.
    pub fn overlay(&mut self, schema: &FormSchema, snapshot: &Snapshot) {
        let mut next = Self::initialize(schema);
        for (name, value) in snapshot {
            if let Some(slot) = next.values.get_mut(name) {
                *slot = value.clone();
            }
        }
        *self = next;
    }

    /// Overlay an untyped JSON snapshot. A value that is not a flat object
    /// leaves the state untouched and returns `false`.
    pub fn overlay_json(&mut self, schema: &FormSchema, snapshot: &Value) -> bool {
        match snapshot_from_value(snapshot) {
            Some(snapshot) => {
                self.overlay(schema, &snapshot);
                true
            }
            None => {
                tracing::warn!("Ignoring malformed form snapshot");
                false
            }
        }
    }

    /// Update one field's value. Validation is deferred to submission; a
    /// stale error for the field is dropped. Unknown names are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                self.errors.remove(name);
                true
            }
            None => false,
        }
    }

    /// Back to schema defaults with no errors
    pub fn reset(&mut self, schema: &FormSchema) {
        *self = Self::initialize(schema);
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &Snapshot {
        &self.values
    }

    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.errors.get(name)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Run field validation across the schema in order
    pub fn validate(&self, schema: &FormSchema) -> FieldErrors {
        schema
            .fields()
            .iter()
            .filter_map(|field| {
                field
                    .validate(self.value(&field.name))
                    .err()
                    .map(|e| (field.name.clone(), e))
            })
            .collect()
    }

    /// Whether a submission would pass validation right now
    pub fn is_submittable(&self, schema: &FormSchema) -> bool {
        schema
            .fields()
            .iter()
            .all(|field| field.validate(self.value(&field.name)).is_ok())
    }
}
