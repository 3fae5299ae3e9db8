//! Form configuration
//!
//! [`FormSettings`] is plain data and can be read from a TOML fragment.
//! [`FormOptions`] adds the runtime pieces that cannot be serialized, namely
//! the `on_change_field` callback.

use crate::callback::{Callback, ChangeCallback};
use crate::form::{FormError, FormResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serializable form settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Prefix for HTML names (`"{prefix}-{name}"`); empty means none
	pub prefix: String,
	/// Validate a field whenever a change event updates it
	pub validate_on_change: bool,
}

impl FormSettings {
	/// Parse settings from TOML
	///
	/// Missing keys keep their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::FormSettings;
	///
	/// let settings = FormSettings::from_toml("prefix = \"signup\"").unwrap();
	/// assert_eq!(settings.prefix, "signup");
	/// assert!(!settings.validate_on_change);
	///
	/// assert!(FormSettings::from_toml("prefix = 3").is_err());
	/// ```
	pub fn from_toml(source: &str) -> FormResult<Self> {
		toml::from_str(source).map_err(|e| FormError::Settings(e.to_string()))
	}
}

/// Options a form is created with
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
	pub settings: FormSettings,
	/// Receives `(name, value)` on every field-level change
	pub on_change_field: Option<ChangeCallback>,
}

impl FormOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: FormSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.settings.prefix = prefix.into();
		self
	}

	pub fn validate_on_change(mut self, enabled: bool) -> Self {
		self.settings.validate_on_change = enabled;
		self
	}

	/// Set the `on_change_field` callback
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::FormOptions;
	///
	/// let options = FormOptions::new().on_change_field(|name, value| {
	///     println!("{name} changed to {value}");
	/// });
	/// assert!(options.on_change_field.is_some());
	/// ```
	pub fn on_change_field<F>(mut self, f: F) -> Self
	where
		F: Fn(String, Value) + Send + Sync + 'static,
	{
		self.on_change_field = Some(Callback::new(move |(name, value): (String, Value)| {
			f(name, value)
		}));
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_settings_defaults() {
		let settings = FormSettings::default();
		assert_eq!(settings.prefix, "");
		assert!(!settings.validate_on_change);
		assert_eq!(FormSettings::from_toml("").unwrap(), settings);
	}

	#[rstest]
	fn test_settings_from_toml() {
		let settings = FormSettings::from_toml(
			r#"
			prefix = "profile"
			validate_on_change = true
			"#,
		)
		.unwrap();

		assert_eq!(
			settings,
			FormSettings {
				prefix: "profile".to_string(),
				validate_on_change: true,
			}
		);
	}

	#[rstest]
	fn test_settings_from_invalid_toml() {
		let err = FormSettings::from_toml("validate_on_change = \"yes\"").unwrap_err();
		assert!(matches!(err, FormError::Settings(_)));
	}

	#[rstest]
	fn test_options_builder() {
		let options = FormOptions::new()
			.with_prefix("user")
			.validate_on_change(true);

		assert_eq!(options.settings.prefix, "user");
		assert!(options.settings.validate_on_change);
		assert!(options.on_change_field.is_none());
	}
}
