//! Serializable form snapshots
//!
//! [`FormMetadata`] captures what a renderer needs to draw a form (names,
//! components, props) together with the current values and errors, as plain
//! data with no handles or closures.

use crate::form::Form;
use schemaform_schema::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of a whole form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMetadata {
	/// HTML name prefix
	pub prefix: String,

	/// Field snapshots, in schema order
	pub fields: Vec<FieldMetadata>,
}

/// Snapshot of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
	pub name: String,
	/// Name with the form prefix applied
	pub html_name: String,
	pub component: String,
	pub default_value: Value,
	pub value: Value,
	#[serde(default)]
	pub error: Option<ValidationError>,
	#[serde(default)]
	pub props: Map<String, Value>,
}

impl Form {
	/// Take a serializable snapshot of the form
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{ComponentRegistry, FormOptions, create_form};
	/// use schemaform_schema::{FieldDescriptor, Schema};
	///
	/// let schema = Schema::from_fields([("email", FieldDescriptor::new("email"))]).unwrap();
	/// let form = create_form(schema, FormOptions::new(), &ComponentRegistry::with_builtins()).unwrap();
	///
	/// let metadata = form.to_metadata();
	/// assert_eq!(metadata.fields.len(), 1);
	/// assert_eq!(metadata.fields[0].name, "email");
	///
	/// let json = serde_json::to_string(&metadata).unwrap();
	/// assert!(json.contains("\"component\":\"email\""));
	/// ```
	pub fn to_metadata(&self) -> FormMetadata {
		let fields = self
			.schema()
			.iter()
			.filter_map(|(name, descriptor)| {
				Some(FieldMetadata {
					name: name.to_string(),
					html_name: self.html_name(name).ok()?,
					component: descriptor.component().to_string(),
					default_value: descriptor.default_value().clone(),
					value: self.get_value(name).ok()?,
					error: self.get_error(name).ok()?,
					props: descriptor.props().clone(),
				})
			})
			.collect();

		FormMetadata {
			prefix: self.prefix().to_string(),
			fields,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::ComponentRegistry;
	use crate::descriptor::create_form;
	use crate::settings::FormOptions;
	use rstest::rstest;
	use schemaform_schema::{FieldDescriptor, Schema, rules};
	use serde_json::json;

	fn contact_form(options: FormOptions) -> Form {
		let schema = Schema::from_fields([
			(
				"email",
				FieldDescriptor::new("email")
					.with_default("")
					.with_prop("placeholder", "you@example.com")
					.with_rule(rules::required("This field is required.")),
			),
			("message", FieldDescriptor::new("textarea").with_prop("rows", 5)),
		])
		.unwrap();
		create_form(schema, options, &ComponentRegistry::with_builtins()).unwrap()
	}

	#[rstest]
	fn test_metadata_captures_values_errors_and_props() {
		let form = contact_form(FormOptions::new().with_prefix("contact"));
		form.set_value("message", "Hello").unwrap();
		form.validate();

		let metadata = form.to_metadata();

		assert_eq!(metadata.prefix, "contact");
		let email = &metadata.fields[0];
		assert_eq!(email.html_name, "contact-email");
		assert_eq!(email.component, "email");
		assert_eq!(email.value, json!(""));
		assert_eq!(email.error.as_ref().unwrap().code.as_deref(), Some("required"));
		assert_eq!(email.props.get("placeholder"), Some(&json!("you@example.com")));

		let message = &metadata.fields[1];
		assert_eq!(message.value, json!("Hello"));
		assert_eq!(message.default_value, json!(null));
		assert!(message.error.is_none());
	}

	#[rstest]
	fn test_metadata_serialization() {
		let metadata = contact_form(FormOptions::new()).to_metadata();

		let json = serde_json::to_string(&metadata).expect("Failed to serialize");
		assert!(json.contains("\"name\":\"message\""));

		let deserialized: FormMetadata =
			serde_json::from_str(&json).expect("Failed to deserialize");
		assert_eq!(deserialized, metadata);
	}
}
