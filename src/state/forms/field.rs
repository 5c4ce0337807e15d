//! Per-kind field behavior: validation and value editing

use super::schema::{FieldDescriptor, FieldKind};
use thiserror::Error;

/// Field-level validation failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Min {0}")]
    TooShort(usize),
    #[error("Max {0}")]
    TooLong(usize),
}

/// Editing input routed to the active field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Char(char),
    Backspace,
    /// Move a selection forward (Right)
    Next,
    /// Move a selection backward (Left)
    Prev,
}

impl FieldDescriptor {
    /// Validate a value against this descriptor
    pub fn validate(&self, value: &str) -> Result<(), FieldError> {
        match self.kind {
            FieldKind::Text => self.validate_text(value),
            FieldKind::SingleSelect | FieldKind::ExclusiveChoice => {
                if self.required && self.selected_index(value).is_none() {
                    Err(FieldError::Required)
                } else {
                    Ok(())
                }
            }
        }
    }

    fn validate_text(&self, value: &str) -> Result<(), FieldError> {
        if self.required && value.trim().is_empty() {
            return Err(FieldError::Required);
        }
        if value.is_empty() {
            return Ok(());
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(FieldError::TooShort(min));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(FieldError::TooLong(max));
            }
        }
        Ok(())
    }

    /// Apply an input to a value. Returns the new value, or `None` when the
    /// input does not change anything for this kind.
    pub fn apply_input(&self, value: &str, input: FieldInput) -> Option<String> {
        match self.kind {
            FieldKind::Text => match input {
                FieldInput::Char(c) => {
                    let mut next = value.to_string();
                    next.push(c);
                    Some(next)
                }
                FieldInput::Backspace => {
                    let mut next = value.to_string();
                    next.pop()?;
                    Some(next)
                }
                FieldInput::Next | FieldInput::Prev => None,
            },
            FieldKind::SingleSelect => {
                let count = self.options.len();
                let next = match (input, self.selected_index(value)) {
                    (FieldInput::Char(c), _) => self.digit_choice(c)?,
                    (FieldInput::Backspace, _) => 0,
                    // 0 is the "Select" placeholder; the list cycles through it
                    (FieldInput::Next, None) => 1,
                    (FieldInput::Next, Some(idx)) => (idx + 2) % (count + 1),
                    (FieldInput::Prev, None) => count,
                    (FieldInput::Prev, Some(idx)) => idx,
                };
                changed(value, position_value(next))
            }
            FieldKind::ExclusiveChoice => {
                let count = self.options.len();
                let next = match (input, self.selected_index(value)) {
                    (FieldInput::Char(c), _) => self.digit_choice(c)?,
                    (FieldInput::Backspace, _) => return None,
                    (FieldInput::Next, None) => 1,
                    (FieldInput::Next, Some(idx)) => (idx + 1) % count + 1,
                    (FieldInput::Prev, None) => count,
                    (FieldInput::Prev, Some(idx)) => (idx + count - 1) % count + 1,
                };
                changed(value, position_value(next))
            }
        }
    }

    fn digit_choice(&self, c: char) -> Option<usize> {
        let digit = c.to_digit(10)? as usize;
        (1..=self.options.len()).contains(&digit).then_some(digit)
    }

    /// Display text for a value (option label for selections)
    pub fn display_value(&self, value: &str) -> String {
        match self.kind {
            FieldKind::Text => value.to_string(),
            FieldKind::SingleSelect | FieldKind::ExclusiveChoice => self
                .option_label(value)
                .unwrap_or("Select")
                .to_string(),
        }
    }
}

/// Stored value for a 1-based option position; 0 means no selection
fn position_value(position: usize) -> String {
    if position == 0 {
        String::new()
    } else {
        position.to_string()
    }
}

fn changed(current: &str, next: String) -> Option<String> {
    (current != next).then_some(next)
}
