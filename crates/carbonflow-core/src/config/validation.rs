//! Configuration validation utilities and rules

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Value must be strictly positive
    #[error("Field '{field}' must be greater than zero")]
    Zero { field: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Zero { field } => field,
        }
    }
}

/// Configuration validator that accumulates validation failures
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that a number is non-zero
    pub fn positive(&mut self, field_name: &str, value: impl Into<u128>) -> &mut Self {
        if value.into() == 0 {
            self.errors.push(ValidationError::Zero {
                field: field_name.to_string(),
            });
        }
        self
    }

    /// Every failure recorded so far, or `Ok` when there are none
    pub fn finish(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
