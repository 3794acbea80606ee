use std::str::FromStr;

use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::ValidationErrors;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn default_message(&self) -> &'static str {
        match self {
            Field::Name => crate::NAME_MESSAGE,
            Field::Email => crate::EMAIL_MESSAGE,
            Field::Message => crate::MESSAGE_MESSAGE,
        }
    }
}

/// Lifecycle of a single contact form.
#[derive(EnumString, Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

impl SubmissionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionState::Submitted)
    }
}

/// Inline error message per field, `None` when the field passed.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        *self.slot_mut(field) = Some(message.into());
    }

    pub fn clear(&mut self, field: Field) {
        *self.slot_mut(field) = None;
    }

    pub fn is_empty(&self) -> bool {
        Field::VARIANTS.iter().all(|field| self.slot(*field).is_none())
    }

    pub fn fields(&self) -> Vec<Field> {
        Field::VARIANTS
            .iter()
            .copied()
            .filter(|field| self.slot(*field).is_some())
            .collect()
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut field_errors = FieldErrors::default();

        for (name, errors) in errors.field_errors() {
            let Ok(field) = Field::from_str(&name) else {
                tracing::warn!(field = %name, "validation error on unknown contact field");
                continue;
            };

            let message = errors
                .first()
                .and_then(|err| err.message.as_ref())
                .map(|message| message.to_string())
                .unwrap_or_else(|| field.default_message().to_owned());

            field_errors.set(field, message);
        }

        field_errors
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .fields()
            .iter()
            .map(|field| field.to_string())
            .collect::<Vec<_>>();

        write!(f, "invalid fields: {}", fields.join(", "))
    }
}
