use crate::callback::FieldChangeCallback;
use crate::component::FieldProps;
use crate::widget::Widget;
use parking_lot::RwLock;
use schemaform_schema::{Rule, ValidationResult};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Capabilities a form needs from each of its fields
///
/// This is the whole contract between the form and a rendered field: any
/// type providing these operations can back a form field. Methods take
/// `&self` because handles are shared between the renderer and the form;
/// implementors keep their state behind interior mutability.
pub trait FieldHandle: Send + Sync {
	/// Current value
	fn get_value(&self) -> Value;

	/// Store a value and return what the field now holds
	///
	/// The returned value may differ from the argument when the field
	/// coerces input.
	fn set_value(&self, value: Value) -> Value;

	/// Current error
	fn get_error(&self) -> ValidationResult;

	/// Store an error and return what the field now holds
	fn set_error(&self, error: ValidationResult) -> ValidationResult;

	/// Run the field's rules, store the outcome as its error and return it
	fn validate(&self) -> ValidationResult;

	/// Field-level change event, as raised by user input
	///
	/// Unlike [`set_value`](Self::set_value) this is where a handle reports
	/// the change through its `on_change` callback. The default only stores
	/// the value.
	fn handle_change(&self, value: Value) -> Value {
		self.set_value(value)
	}
}

#[derive(Debug)]
struct FieldState {
	value: Value,
	error: ValidationResult,
}

/// Stock field handle
///
/// Holds a value cell and an error cell, coerces writes through its
/// [`Widget`] and validates against the descriptor's rules, stopping at the
/// first failure.
pub struct Field {
	name: String,
	widget: Widget,
	default_value: Value,
	rules: Vec<Arc<dyn Rule>>,
	props: Map<String, Value>,
	on_change: FieldChangeCallback,
	validate_on_change: bool,
	state: RwLock<FieldState>,
}

impl Field {
	/// Create a field from render props
	///
	/// The initial value is the coerced default value, with no error.
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{Callback, Field, FieldHandle, FieldProps, Widget};
	/// use serde_json::json;
	///
	/// let props = FieldProps::new("age", "number", Callback::new(|_: serde_json::Value| {})).with_default("18");
	/// let field = Field::new(Widget::NumberInput, props);
	///
	/// assert_eq!(field.get_value(), json!(18));
	/// assert_eq!(field.set_value(json!("21")), json!(21));
	/// assert!(field.get_error().is_none());
	/// ```
	pub fn new(widget: Widget, props: FieldProps) -> Self {
		let FieldProps {
			name,
			default_value,
			rules,
			props,
			on_change,
			validate_on_change,
			..
		} = props;
		let value = widget.coerce(default_value.clone());
		Self {
			name,
			widget,
			default_value,
			rules,
			props,
			on_change,
			validate_on_change,
			state: RwLock::new(FieldState { value, error: None }),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn widget(&self) -> Widget {
		self.widget
	}

	pub fn default_value(&self) -> &Value {
		&self.default_value
	}

	pub fn props(&self) -> &Map<String, Value> {
		&self.props
	}
}

impl FieldHandle for Field {
	fn get_value(&self) -> Value {
		self.state.read().value.clone()
	}

	fn set_value(&self, value: Value) -> Value {
		let value = self.widget.coerce(value);
		self.state.write().value = value.clone();
		value
	}

	fn get_error(&self) -> ValidationResult {
		self.state.read().error.clone()
	}

	fn set_error(&self, error: ValidationResult) -> ValidationResult {
		self.state.write().error = error.clone();
		error
	}

	fn validate(&self) -> ValidationResult {
		let value = self.get_value();
		let result = self.rules.iter().find_map(|rule| rule.check(&value));
		self.set_error(result)
	}

	/// Stores the value, validates when the form asked for
	/// validate-on-change, then reports the stored value through the change
	/// callback exactly once.
	fn handle_change(&self, value: Value) -> Value {
		let value = self.set_value(value);
		if self.validate_on_change {
			self.validate();
		}
		tracing::trace!(field = %self.name, "field changed");
		self.on_change.call(value.clone());
		value
	}
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("widget", &self.widget)
			.field("default_value", &self.default_value)
			.field("rules", &self.rules.len())
			.field("state", &*self.state.read())
			.finish()
	}
}
