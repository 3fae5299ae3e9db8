//! Validation outcome types and the [`Rule`] capability.
//!
//! A field's validation result is `Option<ValidationError>`: `None` means the
//! field is valid, `Some` carries the error. There is no "falsy but
//! meaningful" error value; every [`ValidationError`] counts as an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of validating one field. `None` = valid.
pub type ValidationResult = Option<ValidationError>;

/// A single field error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
	/// Human-readable message
	pub message: String,
	/// Machine-readable code of the rule that failed (e.g. `"required"`)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
}

impl ValidationError {
	/// Create an error with a message and no code
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_schema::ValidationError;
	///
	/// let error = ValidationError::new("This field is required.");
	/// assert_eq!(error.message, "This field is required.");
	/// assert!(error.code.is_none());
	/// ```
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			code: None,
		}
	}

	/// Attach a rule code to the error
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_schema::ValidationError;
	///
	/// let error = ValidationError::new("Too short").with_code("min_length");
	/// assert_eq!(error.code.as_deref(), Some("min_length"));
	/// ```
	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}
}

impl fmt::Display for ValidationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}

impl std::error::Error for ValidationError {}

impl From<&str> for ValidationError {
	fn from(message: &str) -> Self {
		Self::new(message)
	}
}

impl From<String> for ValidationError {
	fn from(message: String) -> Self {
		Self::new(message)
	}
}

/// A validation rule attached to a field descriptor.
///
/// Rules are applied by the field handle, in declaration order. Any
/// `Fn(&Value) -> ValidationResult` closure is a rule.
///
/// # Examples
///
/// ```
/// use schemaform_schema::{Rule, ValidationError};
/// use serde_json::json;
///
/// let positive = |value: &serde_json::Value| match value.as_f64() {
///     Some(n) if n > 0.0 => None,
///     _ => Some(ValidationError::new("Must be positive")),
/// };
///
/// assert!(positive.check(&json!(3)).is_none());
/// assert!(positive.check(&json!(-1)).is_some());
/// ```
pub trait Rule: Send + Sync {
	/// Check a value, returning `Some(error)` when it is invalid
	fn check(&self, value: &serde_json::Value) -> ValidationResult;
}

impl<F> Rule for F
where
	F: Fn(&serde_json::Value) -> ValidationResult + Send + Sync,
{
	fn check(&self, value: &serde_json::Value) -> ValidationResult {
		self(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_validation_error_display() {
		let error = ValidationError::new("Enter a valid email address").with_code("email");
		assert_eq!(error.to_string(), "Enter a valid email address");
	}

	#[rstest]
	fn test_validation_error_serialization_skips_missing_code() {
		let json = serde_json::to_value(ValidationError::new("bad")).unwrap();
		assert_eq!(json, serde_json::json!({"message": "bad"}));

		let json = serde_json::to_value(ValidationError::new("bad").with_code("x")).unwrap();
		assert_eq!(json, serde_json::json!({"message": "bad", "code": "x"}));
	}

	#[rstest]
	fn test_validation_error_from_str() {
		let error: ValidationError = "oops".into();
		assert_eq!(error, ValidationError::new("oops"));
	}
}
