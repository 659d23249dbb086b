//! Form validation rules and the error bag sent back with a failed form.

use std::collections::BTreeMap;

use crate::i18n;

pub const PASSWORD_MIN_LENGTH: usize = 6;
const MAX_STRING_LENGTH: usize = 255;

/// Field → messages, plus the form the client must show again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    redirect_to: Option<String>,
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form anchor to bounce back to, e.g. `/account#password`
    pub fn back_to(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = Some(redirect_to.into());
        self
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("The {field} field is required."));
            return false;
        }
        true
    }

    pub fn max_length(&mut self, field: &str, value: &str) {
        if value.chars().count() > MAX_STRING_LENGTH {
            self.add(
                field,
                format!("The {field} may not be greater than {MAX_STRING_LENGTH} characters."),
            );
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if self.required(field, value) {
            self.max_length(field, value);
            if !is_valid_email(value) {
                self.add(field, format!("The {field} must be a valid email address."));
            }
        }
    }

    /// required | min:6 | confirmed
    pub fn password(&mut self, field: &str, value: &str, confirmation: &str) {
        if !self.required(field, value) {
            return;
        }
        if value.chars().count() < PASSWORD_MIN_LENGTH {
            self.add(
                field,
                format!("The {field} must be at least {PASSWORD_MIN_LENGTH} characters."),
            );
        }
        if value != confirmation {
            self.add(field, format!("The {field} confirmation does not match."));
        }
    }

    pub fn timezone(&mut self, field: &str, value: &str) {
        if self.required(field, value) && !i18n::is_valid_timezone(value) {
            self.add(field, format!("The {field} must be a valid zone."));
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
