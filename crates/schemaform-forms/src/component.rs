//! Component resolution
//!
//! A schema names each field's component by key. At mount time a
//! [`ComponentResolver`] maps the descriptor to a [`FieldComponent`], which
//! turns the field's render props into a [`FieldHandle`].
//!
//! ```text
//! FieldDescriptor ──resolve()──▶ FieldComponent ──instantiate(props)──▶ Arc<dyn FieldHandle>
//! ```

use crate::callback::FieldChangeCallback;
use crate::field::{Field, FieldHandle};
use crate::widget::Widget;
use schemaform_schema::{FieldDescriptor, Rule};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Everything a component receives when a form renders one of its fields
#[derive(Clone)]
pub struct FieldProps {
	/// Field name (the key in the schema)
	pub name: String,
	/// Component key from the descriptor
	pub component: String,
	/// Value the field starts with
	pub default_value: Value,
	/// Rules the field validates against
	pub rules: Vec<Arc<dyn Rule>>,
	/// Extra props from the descriptor, passed through untouched
	pub props: Map<String, Value>,
	/// Called with the new value on every field-level change
	pub on_change: FieldChangeCallback,
	/// Whether a change event also validates the field
	pub validate_on_change: bool,
}

impl FieldProps {
	pub fn new(
		name: impl Into<String>,
		component: impl Into<String>,
		on_change: FieldChangeCallback,
	) -> Self {
		Self {
			name: name.into(),
			component: component.into(),
			default_value: Value::Null,
			rules: Vec::new(),
			props: Map::new(),
			on_change,
			validate_on_change: false,
		}
	}

	/// Props for the field `name` declared by `descriptor`
	pub fn from_descriptor(
		name: impl Into<String>,
		descriptor: &FieldDescriptor,
		on_change: FieldChangeCallback,
	) -> Self {
		Self {
			name: name.into(),
			component: descriptor.component().to_string(),
			default_value: descriptor.default_value().clone(),
			rules: descriptor.rules().to_vec(),
			props: descriptor.props().clone(),
			on_change,
			validate_on_change: false,
		}
	}

	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default_value = value.into();
		self
	}

	pub fn with_rule(mut self, rule: Arc<dyn Rule>) -> Self {
		self.rules.push(rule);
		self
	}

	pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props.insert(key.into(), value.into());
		self
	}

	pub fn validate_on_change(mut self, enabled: bool) -> Self {
		self.validate_on_change = enabled;
		self
	}
}

impl fmt::Debug for FieldProps {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldProps")
			.field("name", &self.name)
			.field("component", &self.component)
			.field("default_value", &self.default_value)
			.field("rules", &self.rules.len())
			.field("props", &self.props)
			.field("validate_on_change", &self.validate_on_change)
			.finish()
	}
}

/// Something that can render a field: turns props into a live handle
///
/// Closures `Fn(FieldProps) -> Arc<dyn FieldHandle>` are components.
pub trait FieldComponent: Send + Sync {
	fn instantiate(&self, props: FieldProps) -> Arc<dyn FieldHandle>;
}

impl<F> FieldComponent for F
where
	F: Fn(FieldProps) -> Arc<dyn FieldHandle> + Send + Sync,
{
	fn instantiate(&self, props: FieldProps) -> Arc<dyn FieldHandle> {
		self(props)
	}
}

/// Component that backs a field with a stock [`Field`] using one [`Widget`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetComponent {
	widget: Widget,
}

impl WidgetComponent {
	pub fn new(widget: Widget) -> Self {
		Self { widget }
	}

	pub fn widget(&self) -> Widget {
		self.widget
	}
}

impl FieldComponent for WidgetComponent {
	fn instantiate(&self, props: FieldProps) -> Arc<dyn FieldHandle> {
		Arc::new(Field::new(self.widget, props))
	}
}

/// Looks up the component that renders a descriptor
pub trait ComponentResolver {
	fn resolve(&self, descriptor: &FieldDescriptor) -> Option<Arc<dyn FieldComponent>>;
}

/// Component registry keyed by the descriptor's component key
#[derive(Clone, Default)]
pub struct ComponentRegistry {
	components: HashMap<String, Arc<dyn FieldComponent>>,
}

impl ComponentRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			components: HashMap::new(),
		}
	}

	/// Create a registry with one [`WidgetComponent`] per [`Widget`]
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::ComponentRegistry;
	///
	/// let registry = ComponentRegistry::with_builtins();
	/// assert!(registry.contains("email"));
	/// assert!(registry.contains("number"));
	/// assert!(!registry.contains("slider"));
	/// ```
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		for widget in Widget::ALL {
			registry.register(widget.key(), WidgetComponent::new(widget));
		}
		registry
	}

	/// Register a component, replacing any previous one under `key`
	pub fn register<C>(&mut self, key: impl Into<String>, component: C)
	where
		C: FieldComponent + 'static,
	{
		self.components.insert(key.into(), Arc::new(component));
	}

	pub fn contains(&self, key: &str) -> bool {
		self.components.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.components.len()
	}

	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}

impl ComponentResolver for ComponentRegistry {
	fn resolve(&self, descriptor: &FieldDescriptor) -> Option<Arc<dyn FieldComponent>> {
		self.components.get(descriptor.component()).cloned()
	}
}

impl fmt::Debug for ComponentRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut keys: Vec<_> = self.components.keys().collect();
		keys.sort();
		f.debug_struct("ComponentRegistry")
			.field("components", &keys)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::callback::Callback;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_builtins_cover_every_widget() {
		let registry = ComponentRegistry::with_builtins();
		assert_eq!(registry.len(), Widget::ALL.len());
		for widget in Widget::ALL {
			assert!(registry.contains(widget.key()));
		}
	}

	#[rstest]
	fn test_resolve_by_descriptor_component() {
		let registry = ComponentRegistry::with_builtins();

		let component = registry
			.resolve(&FieldDescriptor::new("number"))
			.expect("number is a builtin");
		let handle = component.instantiate(
			FieldProps::new("age", "number", Callback::new(|_: Value| {})).with_default("30"),
		);
		assert_eq!(handle.get_value(), json!(30));

		assert!(registry.resolve(&FieldDescriptor::new("slider")).is_none());
	}

	#[rstest]
	fn test_closure_component_overrides_builtin() {
		let mut registry = ComponentRegistry::with_builtins();
		registry.register("text", |props: FieldProps| -> Arc<dyn FieldHandle> {
			Arc::new(Field::new(Widget::Textarea, props))
		});

		let handle = registry
			.resolve(&FieldDescriptor::new("text"))
			.unwrap()
			.instantiate(FieldProps::new("bio", "text", Callback::new(|_: Value| {})).with_default(5));
		assert_eq!(handle.get_value(), json!("5"));
		assert_eq!(registry.len(), Widget::ALL.len());
	}

	#[rstest]
	fn test_props_from_descriptor() {
		let descriptor = FieldDescriptor::new("email")
			.with_default("a@b.com")
			.with_prop("placeholder", "you@example.com")
			.with_rule(schemaform_schema::rules::required("required"));

		let props = FieldProps::from_descriptor("email", &descriptor, Callback::new(|_: Value| {}));

		assert_eq!(props.name, "email");
		assert_eq!(props.component, "email");
		assert_eq!(props.default_value, json!("a@b.com"));
		assert_eq!(props.rules.len(), 1);
		assert_eq!(props.props.get("placeholder"), Some(&json!("you@example.com")));
		assert!(!props.validate_on_change);
	}
}
