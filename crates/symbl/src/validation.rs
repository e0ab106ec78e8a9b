//! Input checks run before a request is built.

use crate::error::{InvalidInputError, ValidationError};

/// Field-presence rules for a request payload.
pub trait Validate {
    /// Returns every violated field at once.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Accumulates violated fields.
#[derive(Debug, Default)]
pub struct Violations {
    fields: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `field` as violated unless `ok`.
    pub fn check(mut self, field: &str, ok: bool) -> Self {
        if !ok {
            self.fields.push(field.to_string());
        }
        self
    }

    /// Record `field` as violated if `value` is empty.
    pub fn require(self, field: &str, value: &str) -> Self {
        self.check(field, !value.is_empty())
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                fields: self.fields,
            })
        }
    }
}

/// Reject an empty path parameter.
pub fn require_param(name: &'static str, value: &str) -> Result<(), InvalidInputError> {
    if value.is_empty() {
        Err(InvalidInputError::EmptyParameter { name })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_violations() {
        let err = Violations::new()
            .require("name", "")
            .require("email", "a@b.c")
            .check("duration", false)
            .finish()
            .unwrap_err();
        assert_eq!(err.fields, vec!["name", "duration"]);
    }

    #[test]
    fn passes_when_clean() {
        assert!(Violations::new().require("name", "x").finish().is_ok());
    }

    #[test]
    fn empty_param_is_rejected() {
        assert!(matches!(
            require_param("conversationId", ""),
            Err(InvalidInputError::EmptyParameter {
                name: "conversationId"
            })
        ));
        assert!(require_param("conversationId", "123").is_ok());
    }
}
