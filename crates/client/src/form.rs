//! The create/edit form model and its client-side validation rules.

use std::str::FromStr;

use db::{NewUser, UserRow};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("name is required")]
    NameRequired,

    #[error("email is required")]
    EmailRequired,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("age must be a whole number, got '{0}'")]
    InvalidAge(String),

    #[error("age must be 0 or greater")]
    NegativeAge,

    #[error("unknown field '{0}' (expected name, age or email)")]
    UnknownField(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Age,
    Email,
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "email" => Ok(Self::Email),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Form contents.  Defaults to empty strings and age 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub age: i32,
    pub email: String,
}

impl UserForm {
    /// Populate the form from an existing row (edit mode).
    pub fn from_user(user: &UserRow) -> Self {
        Self {
            name: user.name.clone(),
            age: user.age,
            email: user.email.clone(),
        }
    }

    /// Set one field from raw user input.  `age` must parse as an integer.
    pub fn set_field(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        match field {
            FormField::Name => self.name = raw.to_string(),
            FormField::Email => self.email = raw.to_string(),
            FormField::Age => {
                self.age = raw
                    .trim()
                    .parse()
                    .map_err(|_| FormError::InvalidAge(raw.to_string()))?;
            }
        }
        Ok(())
    }

    /// Check the form and produce the payload sent to the API.
    pub fn validate(&self) -> Result<NewUser, FormError> {
        if self.name.is_empty() {
            return Err(FormError::NameRequired);
        }
        if self.age < 0 {
            return Err(FormError::NegativeAge);
        }
        if self.email.is_empty() {
            return Err(FormError::EmailRequired);
        }
        match self.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(FormError::InvalidEmail(self.email.clone())),
        }

        Ok(NewUser {
            name: self.name.clone(),
            age: self.age,
            email: self.email.clone(),
        })
    }
}
