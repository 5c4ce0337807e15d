//! Field schema: descriptors and schema loading

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Built-in sign-up schema shipped with the binary
const BUILTIN_SCHEMA: &str = include_str!("../../../assets/signup_form.json");

/// Supported field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-text input
    Text,
    /// One option picked from a drop-down style list
    SingleSelect,
    /// One option picked from a row of radio markers
    ExclusiveChoice,
}

impl FieldKind {
    /// Parse a kind tag from the schema source.
    ///
    /// Accepts both the deployment tags (`TEXT`, `LIST`, `RADIO`) and the
    /// variant names. Returns `None` for anything else.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "TEXT" | "Text" => Some(Self::Text),
            "LIST" | "SingleSelect" => Some(Self::SingleSelect),
            "RADIO" | "ExclusiveChoice" => Some(Self::ExclusiveChoice),
            _ => None,
        }
    }

    /// Whether the kind picks its value from `options`
    pub fn has_options(self) -> bool {
        match self {
            Self::Text => false,
            Self::SingleSelect | Self::ExclusiveChoice => true,
        }
    }
}

/// Describes one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: i64,
    pub name: String,
    pub kind: FieldKind,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Option labels; the stored value of option `i` is `(i + 1).to_string()`
    pub options: Vec<String>,
}

impl FieldDescriptor {
    /// Initial value when nothing has been persisted
    pub fn initial_value(&self) -> String {
        self.default_value.clone().unwrap_or_default()
    }

    /// Label shown next to the control
    pub fn label(&self) -> String {
        if self.required {
            format!("{} *", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Zero-based option index for a stored value, if it names an option
    pub fn selected_index(&self, value: &str) -> Option<usize> {
        let position: usize = value.parse().ok()?;
        (1..=self.options.len())
            .contains(&position)
            .then(|| position - 1)
    }

    /// Option label for a stored value
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.selected_index(value)
            .map(|idx| self.options[idx].as_str())
    }
}

/// Builders for schemas assembled in code
#[cfg(test)]
impl FieldDescriptor {
    fn new(id: i64, name: &str, kind: FieldKind, options: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            default_value: None,
            required: false,
            min_length: None,
            max_length: None,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Create a text field descriptor
    pub fn text(id: i64, name: &str) -> Self {
        Self::new(id, name, FieldKind::Text, &[])
    }

    /// Create a single-select field descriptor
    pub fn single_select(id: i64, name: &str, options: &[&str]) -> Self {
        Self::new(id, name, FieldKind::SingleSelect, options)
    }

    /// Create an exclusive-choice field descriptor
    pub fn exclusive_choice(id: i64, name: &str, options: &[&str]) -> Self {
        Self::new(id, name, FieldKind::ExclusiveChoice, options)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }
}

/// Schema loading failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid schema JSON: {0}")]
    Parse(String),
    #[error("duplicate field name '{0}'")]
    DuplicateName(String),
    #[error("field '{0}' has no options")]
    MissingOptions(String),
    #[error("field '{name}' has minLength {min} greater than maxLength {max}")]
    InvertedLength { name: String, min: usize, max: usize },
}

/// Ordered, read-only sequence of field descriptors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    /// Build a schema, ordering fields by id and checking invariants
    pub fn new(mut fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        fields.sort_by_key(|f| f.id);

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateName(field.name.clone()));
            }
            if field.kind.has_options() && field.options.is_empty() {
                return Err(SchemaError::MissingOptions(field.name.clone()));
            }
            if let (Some(min), Some(max)) = (field.min_length, field.max_length) {
                if min > max {
                    return Err(SchemaError::InvertedLength {
                        name: field.name.clone(),
                        min,
                        max,
                    });
                }
            }
        }

        Ok(Self { fields })
    }

    /// Parse a schema from JSON text.
    ///
    /// Accepts `{ "data": [...] }` or a bare array. Entries with an
    /// unrecognized kind are dropped.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument =
            serde_json::from_str(text).map_err(|e| SchemaError::Parse(e.to_string()))?;

        let raw_fields = match document {
            SchemaDocument::Wrapped { data } => data,
            SchemaDocument::Bare(fields) => fields,
        };

        let fields = raw_fields
            .into_iter()
            .filter_map(|raw| {
                let Some(kind) = FieldKind::from_tag(&raw.field_type) else {
                    tracing::warn!(
                        "Skipping field '{}' with unknown kind '{}'",
                        raw.name,
                        raw.field_type
                    );
                    return None;
                };
                Some(FieldDescriptor {
                    id: raw.id,
                    name: raw.name,
                    kind,
                    default_value: raw.default_value,
                    required: raw.required.unwrap_or(false),
                    min_length: raw.min_length,
                    max_length: raw.max_length,
                    options: raw.options,
                })
            })
            .collect();

        Self::new(fields)
    }

    /// The schema embedded in the binary
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::from_json(BUILTIN_SCHEMA)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Wrapped { data: Vec<RawField> },
    Bare(Vec<RawField>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    id: i64,
    name: String,
    #[serde(alias = "kind")]
    field_type: String,
    default_value: Option<String>,
    required: Option<bool>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    #[serde(default, rename = "listOfValues1", alias = "options")]
    options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod field_kind {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_tag_deployment_tags() {
            assert_eq!(FieldKind::from_tag("TEXT"), Some(FieldKind::Text));
            assert_eq!(FieldKind::from_tag("LIST"), Some(FieldKind::SingleSelect));
            assert_eq!(FieldKind::from_tag("RADIO"), Some(FieldKind::ExclusiveChoice));
        }

        #[test]
        fn test_from_tag_variant_names() {
            assert_eq!(
                FieldKind::from_tag("SingleSelect"),
                Some(FieldKind::SingleSelect)
            );
        }

        #[test]
        fn test_from_tag_unknown() {
            assert_eq!(FieldKind::from_tag("CHECKBOX"), None);
            assert_eq!(FieldKind::from_tag("text"), None);
        }
    }

    mod descriptor {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_initial_value_defaults_to_empty() {
            assert_eq!(FieldDescriptor::text(1, "email").initial_value(), "");
            assert_eq!(
                FieldDescriptor::text(1, "email")
                    .with_default("a@b.c")
                    .initial_value(),
                "a@b.c"
            );
        }

        #[test]
        fn test_label_marks_required() {
            assert_eq!(FieldDescriptor::text(1, "email").required().label(), "email *");
            assert_eq!(FieldDescriptor::text(1, "email").label(), "email");
        }

        #[test]
        fn test_selected_index_is_one_based() {
            let field = FieldDescriptor::single_select(2, "plan", &["Basic", "Pro"]);
            assert_eq!(field.selected_index("1"), Some(0));
            assert_eq!(field.selected_index("2"), Some(1));
            assert_eq!(field.selected_index("0"), None);
            assert_eq!(field.selected_index("3"), None);
            assert_eq!(field.selected_index(""), None);
            assert_eq!(field.option_label("2"), Some("Pro"));
        }
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_builtin_schema_loads() {
            let schema = FormSchema::builtin().unwrap();
            assert!(!schema.is_empty());
            assert!(schema.field("email").is_some());
        }

        #[test]
        fn test_from_json_wrapped_document() {
            let json = r#"{"data": [
                {"id": 2, "name": "plan", "fieldType": "LIST", "required": true,
                 "listOfValues1": ["Basic", "Pro"]},
                {"id": 1, "name": "email", "fieldType": "TEXT", "minLength": 3}
            ]}"#;
            let schema = FormSchema::from_json(json).unwrap();
            let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["email", "plan"]);

            let plan = schema.field("plan").unwrap();
            assert_eq!(plan.kind, FieldKind::SingleSelect);
            assert!(plan.required);
            assert_eq!(plan.options, vec!["Basic".to_string(), "Pro".to_string()]);

            let email = schema.field("email").unwrap();
            assert!(!email.required);
            assert_eq!(email.min_length, Some(3));
        }

        #[test]
        fn test_from_json_bare_array_with_kind_alias() {
            let json = r#"[{"id": 1, "name": "tier", "kind": "ExclusiveChoice",
                            "options": ["A", "B"]}]"#;
            let schema = FormSchema::from_json(json).unwrap();
            assert_eq!(schema.len(), 1);
            assert_eq!(schema.fields()[0].kind, FieldKind::ExclusiveChoice);
        }

        #[test]
        fn test_unknown_kind_is_skipped() {
            let json = r#"[
                {"id": 1, "name": "email", "fieldType": "TEXT"},
                {"id": 2, "name": "agree", "fieldType": "CHECKBOX"}
            ]"#;
            let schema = FormSchema::from_json(json).unwrap();
            assert_eq!(schema.len(), 1);
            assert!(schema.field("agree").is_none());
        }

        #[test]
        fn test_duplicate_names_rejected() {
            let result = FormSchema::new(vec![
                FieldDescriptor::text(1, "email"),
                FieldDescriptor::text(2, "email"),
            ]);
            assert_eq!(result, Err(SchemaError::DuplicateName("email".to_string())));
        }

        #[test]
        fn test_selection_without_options_rejected() {
            let result = FormSchema::new(vec![FieldDescriptor::single_select(1, "plan", &[])]);
            assert_eq!(result, Err(SchemaError::MissingOptions("plan".to_string())));
        }

        #[test]
        fn test_inverted_length_rejected() {
            let result = FormSchema::new(vec![
                FieldDescriptor::text(1, "code").with_length(Some(5), Some(2))
            ]);
            assert!(matches!(result, Err(SchemaError::InvertedLength { .. })));
        }

        #[test]
        fn test_malformed_json_is_parse_error() {
            assert!(matches!(
                FormSchema::from_json("not json"),
                Err(SchemaError::Parse(_))
            ));
        }
    }
}
