//! Check-then-commit submission

use super::form_state::{FieldErrors, FormState};
use super::persistence::{Snapshot, SnapshotStore, StoreError};
use super::schema::FormSchema;
use thiserror::Error;

/// A validated snapshot that was written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub values: Snapshot,
}

/// Submission rejected by field validation; nothing was persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailed {
    pub errors: FieldErrors,
}

impl ValidationFailed {
    /// User-facing message for one field
    pub fn message(&self, name: &str) -> Option<String> {
        self.errors.get(name).map(|e| e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{} field(s) need attention", .0.errors.len())]
    Invalid(ValidationFailed),
    #[error("could not save form: {0}")]
    Storage(#[from] StoreError),
}

/// Validate every field, then persist the whole snapshot under `key`.
///
/// On validation failure the errors are recorded on `state` and the store
/// is not touched.
pub fn submit(
    schema: &FormSchema,
    state: &mut FormState,
    store: &dyn SnapshotStore,
    key: &str,
) -> Result<Committed, SubmitError> {
    let errors = state.validate(schema);
    if !errors.is_empty() {
        tracing::debug!("Submission of '{key}' rejected: {} invalid field(s)", errors.len());
        state.set_errors(errors.clone());
        return Err(SubmitError::Invalid(ValidationFailed { errors }));
    }

    state.set_errors(FieldErrors::new());
    let values = state.values().clone();
    store.save(key, &values)?;
    tracing::info!("Committed form '{key}' ({} fields)", values.len());

    Ok(Committed { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::FieldError;
    use crate::state::forms::persistence::{MemoryStore, MockSnapshotStore};
    use crate::state::forms::schema::FieldDescriptor;
    use pretty_assertions::assert_eq;
    use std::io;

    const KEY: &str = "signup_form_v1";

    #[test]
    fn test_required_email_empty_rejected_without_persisting() {
        let schema = FormSchema::new(vec![FieldDescriptor::text(1, "email").required()]).unwrap();
        let mut state = FormState::initialize(&schema);
        state.set_value("email", "");

        let mut store = MockSnapshotStore::new();
        store.expect_save().never();

        let result = submit(&schema, &mut state, &store, KEY);

        let Err(SubmitError::Invalid(failed)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(failed.message("email"), Some("This field is required".to_string()));
        assert_eq!(failed.errors.len(), 1);
        assert_eq!(state.error("email"), Some(&FieldError::Required));
    }

    #[test]
    fn test_required_plan_selected_commits() {
        let schema = FormSchema::new(vec![FieldDescriptor::single_select(
            2,
            "plan",
            &["Basic", "Pro"],
        )
        .required()])
        .unwrap();
        let mut state = FormState::initialize(&schema);
        state.set_value("plan", "2");
        let store = MemoryStore::new();

        let committed = submit(&schema, &mut state, &store, KEY).unwrap();

        let expected = Snapshot::from([("plan".to_string(), "2".to_string())]);
        assert_eq!(committed.values, expected);
        assert_eq!(store.load(KEY), Some(expected));
    }

    #[test]
    fn test_filled_required_field_passes_after_failure() {
        let schema = FormSchema::new(vec![FieldDescriptor::text(1, "email").required()]).unwrap();
        let mut state = FormState::initialize(&schema);
        let store = MemoryStore::new();

        assert!(submit(&schema, &mut state, &store, KEY).is_err());
        state.set_value("email", "joy@example.com");

        assert!(submit(&schema, &mut state, &store, KEY).is_ok());
        assert!(state.errors().is_empty());
    }

    #[test]
    fn test_min_length_gate() {
        let schema = FormSchema::new(vec![
            FieldDescriptor::text(1, "nick").with_length(Some(3), None)
        ])
        .unwrap();
        let mut state = FormState::initialize(&schema);
        let store = MemoryStore::new();

        state.set_value("nick", "ab");
        let Err(SubmitError::Invalid(failed)) = submit(&schema, &mut state, &store, KEY) else {
            panic!("expected validation failure");
        };
        assert_eq!(failed.errors.get("nick"), Some(&FieldError::TooShort(3)));
        assert!(store.load(KEY).is_none());

        state.set_value("nick", "abc");
        assert!(submit(&schema, &mut state, &store, KEY).is_ok());
    }

    #[test]
    fn test_whitespace_over_max_length_is_not_committed() {
        let schema = FormSchema::new(vec![
            FieldDescriptor::text(5, "referralCode").with_length(None, Some(12))
        ])
        .unwrap();
        let mut state = FormState::initialize(&schema);
        state.set_value("referralCode", &" ".repeat(40));

        let mut store = MockSnapshotStore::new();
        store.expect_save().never();

        let Err(SubmitError::Invalid(failed)) = submit(&schema, &mut state, &store, KEY) else {
            panic!("expected validation failure");
        };
        assert_eq!(failed.message("referralCode"), Some("Max 12".to_string()));
    }

    #[test]
    fn test_store_failure_surfaces_as_storage_error() {
        let schema = FormSchema::new(vec![FieldDescriptor::text(1, "email")]).unwrap();
        let mut state = FormState::initialize(&schema);

        let mut store = MockSnapshotStore::new();
        store.expect_save().times(1).returning(|_, _| {
            Err(StoreError::Io {
                path: "/readonly/signup_form_v1.json".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        });

        let result = submit(&schema, &mut state, &store, KEY);
        assert!(matches!(result, Err(SubmitError::Storage(_))));
    }

    #[test]
    fn test_commit_saves_whole_snapshot() {
        let schema = FormSchema::new(vec![
            FieldDescriptor::text(1, "email"),
            FieldDescriptor::exclusive_choice(2, "tier", &["A", "B"]).with_default("1"),
        ])
        .unwrap();
        let mut state = FormState::initialize(&schema);
        state.set_value("email", "a@b.c");

        let mut store = MockSnapshotStore::new();
        store
            .expect_save()
            .withf(|key, snapshot| key == KEY && snapshot.len() == 2 && snapshot["tier"] == "1")
            .times(1)
            .returning(|_, _| Ok(()));

        assert!(submit(&schema, &mut state, &store, KEY).is_ok());
    }
}
