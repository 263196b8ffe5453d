//! Row validation hints.
//!
//! Invalid rows never fail a request; they are excluded from the invoice and
//! reported back with one of these hints so the form can show what is wrong.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::money::AmountError;

/// Validation error with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
    /// Suggestion for how to fix the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must not be empty", label))
            .with_suggestion(format!("Enter a value for {}", label.to_lowercase()))
    }

    pub fn invalid_price(field: &str, error: &AmountError) -> Self {
        match error {
            AmountError::Empty => Self::empty_field(field, "Price"),
            other => Self::new(field, format!("Price is invalid: {}", other))
                .with_suggestion("Use a plain non-negative number, e.g. 2.50"),
        }
    }

    pub fn invalid_count(field: &str, error: &AmountError) -> Self {
        Self::new(field, format!("Count is invalid: {}", error))
            .with_suggestion("Use a whole number of at least 1, e.g. 4")
    }

    pub fn discount_out_of_range(field: &str, error: &AmountError) -> Self {
        Self::new(field, error.to_string()).with_suggestion("Pick a percentage from 0 to 100")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }
}
