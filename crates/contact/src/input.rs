use std::sync::LazyLock;

use regex::Regex;
use validator::Validate;

use crate::{Field, FieldErrors};

pub const NAME_MESSAGE: &str = "Please enter your name (at least 2 characters)";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const MESSAGE_MESSAGE: &str = "Message must be at least 10 characters";

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot in the domain part.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern must compile")
});

/// Error text comes from [`Field::default_message`].
#[derive(Validate, Default, Clone, Debug, PartialEq, Eq)]
pub struct ContactFormInput {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(regex(path = *EMAIL_SHAPE))]
    pub email: String,
    #[validate(length(min = 10))]
    pub message: String,
}

impl ContactFormInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    /// Copy with surrounding whitespace removed, the shape that gets validated and sent.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            message: self.message.trim().to_owned(),
        }
    }

    /// Validates a trimmed copy against the field rules.
    pub fn check(&self) -> Result<Self, FieldErrors> {
        let trimmed = self.trimmed();

        match trimmed.validate() {
            Ok(()) => Ok(trimmed),
            Err(errors) => Err(FieldErrors::from(&errors)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}
