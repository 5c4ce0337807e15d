//! Form domain layer
//!
//! Schema-driven forms: a declarative field schema is turned into
//! validated, persisted form state.
//! - `schema`: field descriptors and schema loading
//! - `field`: per-kind validation and editing
//! - `form_state`: values and errors for one form instance
//! - `persistence`: snapshot stores (memory, file)
//! - `submission`: check-then-commit
//! - `dynamic_form`: controller binding all of the above to a storage slot

mod dynamic_form;
mod field;
mod form_state;
mod persistence;
mod schema;
mod submission;

pub use dynamic_form::{DynamicForm, Form, FormButton, DEFAULT_FORM_KEY};
pub use field::{FieldError, FieldInput};
pub use form_state::{FieldErrors, FormState};
pub use persistence::{
    parse_snapshot, snapshot_from_value, FileStore, MemoryStore, Snapshot, SnapshotStore,
    StoreError,
};
pub use schema::{FieldDescriptor, FieldKind, FormSchema, SchemaError};
pub use submission::{submit, Committed, SubmitError, ValidationFailed};
