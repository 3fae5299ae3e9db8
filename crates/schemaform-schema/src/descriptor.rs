use crate::validation::{Rule, ValidationResult};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Declarative description of one form field
///
/// A descriptor names the component that renders the field, the value the
/// field starts with, the rules it validates against and any extra props the
/// component understands.
#[derive(Clone)]
pub struct FieldDescriptor {
	component: String,
	default_value: Value,
	rules: Vec<Arc<dyn Rule>>,
	props: Map<String, Value>,
}

impl FieldDescriptor {
	/// Create a descriptor rendered by `component`, defaulting to `null`
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_schema::FieldDescriptor;
	/// use serde_json::json;
	///
	/// let descriptor = FieldDescriptor::new("email");
	/// assert_eq!(descriptor.component(), "email");
	/// assert_eq!(descriptor.default_value(), &json!(null));
	/// assert!(descriptor.rules().is_empty());
	/// ```
	pub fn new(component: impl Into<String>) -> Self {
		Self {
			component: component.into(),
			default_value: Value::Null,
			rules: Vec::new(),
			props: Map::new(),
		}
	}

	/// Set the default value
	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default_value = value.into();
		self
	}

	/// Append a validation rule
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_schema::{FieldDescriptor, rules};
	///
	/// let descriptor = FieldDescriptor::new("text")
	///     .with_rule(rules::required("This field is required."))
	///     .with_rule(rules::max_length(50, "Too long"));
	/// assert_eq!(descriptor.rules().len(), 2);
	/// ```
	pub fn with_rule(mut self, rule: Arc<dyn Rule>) -> Self {
		self.rules.push(rule);
		self
	}

	/// Append a closure as a validation rule
	pub fn with_rule_fn<F>(self, rule: F) -> Self
	where
		F: Fn(&Value) -> ValidationResult + Send + Sync + 'static,
	{
		self.with_rule(Arc::new(rule))
	}

	/// Set an extra prop passed through to the rendering component
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_schema::FieldDescriptor;
	/// use serde_json::json;
	///
	/// let descriptor = FieldDescriptor::new("text").with_prop("placeholder", "Your name");
	/// assert_eq!(descriptor.props().get("placeholder"), Some(&json!("Your name")));
	/// ```
	pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props.insert(key.into(), value.into());
		self
	}

	pub fn component(&self) -> &str {
		&self.component
	}

	pub fn default_value(&self) -> &Value {
		&self.default_value
	}

	pub fn rules(&self) -> &[Arc<dyn Rule>] {
		&self.rules
	}

	pub fn props(&self) -> &Map<String, Value> {
		&self.props
	}
}

impl fmt::Debug for FieldDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDescriptor")
			.field("component", &self.component)
			.field("default_value", &self.default_value)
			.field("rules", &self.rules.len())
			.field("props", &self.props)
			.finish()
	}
}
