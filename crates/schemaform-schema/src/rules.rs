//! Ready-made rules for field descriptors
//!
//! Each constructor returns an `Arc<dyn Rule>` that can be pushed onto a
//! [`FieldDescriptor`](crate::FieldDescriptor). Apart from [`required`], rules
//! treat empty values (`null`, `""`) as valid so that optional fields only
//! fail when they carry a bad value.

use crate::validation::{Rule, ValidationError, ValidationResult};
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

// Same shape as the server-side email check: local part, `@`, dotted domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

fn is_empty(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.trim().is_empty(),
		Value::Array(items) => items.is_empty(),
		_ => false,
	}
}

fn char_len(value: &Value) -> Option<usize> {
	match value {
		Value::String(s) => Some(s.chars().count()),
		Value::Array(items) => Some(items.len()),
		_ => None,
	}
}

fn as_number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

fn fail(message: impl Into<String>, code: &str) -> ValidationResult {
	Some(ValidationError::new(message).with_code(code))
}

/// Fails on `null`, blank strings, empty arrays and `false`
///
/// # Examples
///
/// ```
/// use schemaform_schema::{Rule, rules};
/// use serde_json::json;
///
/// let rule = rules::required("This field is required.");
/// assert!(rule.check(&json!("")).is_some());
/// assert!(rule.check(&json!(false)).is_some());
/// assert!(rule.check(&json!("x")).is_none());
/// ```
pub fn required(message: impl Into<String>) -> Arc<dyn Rule> {
	let message = message.into();
	Arc::new(move |value: &Value| {
		if is_empty(value) || value == &Value::Bool(false) {
			fail(message.clone(), "required")
		} else {
			None
		}
	})
}

/// Fails when a string (or array) is shorter than `min`
pub fn min_length(min: usize, message: impl Into<String>) -> Arc<dyn Rule> {
	let message = message.into();
	Arc::new(move |value: &Value| match char_len(value) {
		Some(len) if len > 0 && len < min => fail(message.clone(), "min_length"),
		_ => None,
	})
}

/// Fails when a string (or array) is longer than `max`
pub fn max_length(max: usize, message: impl Into<String>) -> Arc<dyn Rule> {
	let message = message.into();
	Arc::new(move |value: &Value| match char_len(value) {
		Some(len) if len > max => fail(message.clone(), "max_length"),
		_ => None,
	})
}

/// Fails when a non-empty string does not match `pattern`
///
/// # Errors
///
/// Returns the regex compile error for an invalid pattern.
///
/// # Examples
///
/// ```
/// use schemaform_schema::{Rule, rules};
/// use serde_json::json;
///
/// let rule = rules::pattern("^[A-Z]{3}$", "Code must be 3 uppercase letters").unwrap();
/// assert!(rule.check(&json!("ABC")).is_none());
/// assert!(rule.check(&json!("abc")).is_some());
/// assert!(rules::pattern("(", "broken").is_err());
/// ```
pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Arc<dyn Rule>, regex::Error> {
	let regex = Regex::new(pattern)?;
	let message = message.into();
	Ok(Arc::new(move |value: &Value| {
		if is_empty(value) {
			return None;
		}
		match value.as_str() {
			Some(s) if regex.is_match(s) => None,
			_ => fail(message.clone(), "pattern"),
		}
	}))
}

/// Fails when a non-empty value is not an email address
///
/// # Examples
///
/// ```
/// use schemaform_schema::{Rule, rules};
/// use serde_json::json;
///
/// let rule = rules::email("Enter a valid email address");
/// assert!(rule.check(&json!("a@b.com")).is_none());
/// assert!(rule.check(&json!("not-an-email")).is_some());
/// assert!(rule.check(&json!(null)).is_none());
/// ```
pub fn email(message: impl Into<String>) -> Arc<dyn Rule> {
	let message = message.into();
	Arc::new(move |value: &Value| {
		if is_empty(value) {
			return None;
		}
		match value.as_str() {
			Some(s) if EMAIL_REGEX.is_match(s) => None,
			_ => fail(message.clone(), "email"),
		}
	})
}

/// Fails when a non-empty value is not a number or is below `min`
pub fn min_value(min: f64, message: impl Into<String>) -> Arc<dyn Rule> {
	let message = message.into();
	Arc::new(move |value: &Value| {
		if is_empty(value) {
			return None;
		}
		match as_number(value) {
			Some(n) if n >= min => None,
			_ => fail(message.clone(), "min_value"),
		}
	})
}

/// Fails when a non-empty value is not a number or is above `max`
pub fn max_value(max: f64, message: impl Into<String>) -> Arc<dyn Rule> {
	let message = message.into();
	Arc::new(move |value: &Value| {
		if is_empty(value) {
			return None;
		}
		match as_number(value) {
			Some(n) if n <= max => None,
			_ => fail(message.clone(), "max_value"),
		}
	})
}
