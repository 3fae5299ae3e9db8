use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Input widget backing a stock [`Field`](crate::Field)
///
/// The widget decides how raw input is coerced before it is stored, the same
/// way an `<input type="number">` hands back a number rather than text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
	TextInput,
	EmailInput,
	PasswordInput,
	NumberInput,
	CheckboxInput,
	HiddenInput,
	Textarea,
}

impl Widget {
	/// All widgets, in registration order
	pub const ALL: [Widget; 7] = [
		Widget::TextInput,
		Widget::EmailInput,
		Widget::PasswordInput,
		Widget::NumberInput,
		Widget::CheckboxInput,
		Widget::HiddenInput,
		Widget::Textarea,
	];

	/// Component key the widget is registered under
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::Widget;
	///
	/// assert_eq!(Widget::NumberInput.key(), "number");
	/// assert_eq!(Widget::from_key("number"), Some(Widget::NumberInput));
	/// assert_eq!(Widget::from_key("slider"), None);
	/// ```
	pub fn key(&self) -> &'static str {
		match self {
			Widget::TextInput => "text",
			Widget::EmailInput => "email",
			Widget::PasswordInput => "password",
			Widget::NumberInput => "number",
			Widget::CheckboxInput => "checkbox",
			Widget::HiddenInput => "hidden",
			Widget::Textarea => "textarea",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|widget| widget.key() == key)
	}

	/// Coerce raw input into the shape this widget stores
	///
	/// - text-like widgets stringify numbers and booleans, `null` stays `null`
	/// - number parses numeric strings, blank input becomes `null`, anything
	///   unparsable is kept so a rule can report it
	/// - checkbox stores a bool (`""`, `"0"`, `"false"`, `"off"`, `0` and
	///   `null` are unchecked)
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::Widget;
	/// use serde_json::json;
	///
	/// assert_eq!(Widget::NumberInput.coerce(json!("30")), json!(30));
	/// assert_eq!(Widget::NumberInput.coerce(json!("abc")), json!("abc"));
	/// assert_eq!(Widget::TextInput.coerce(json!(30)), json!("30"));
	/// assert_eq!(Widget::CheckboxInput.coerce(json!("on")), json!(true));
	/// ```
	pub fn coerce(&self, value: Value) -> Value {
		match self {
			Widget::NumberInput => coerce_number(value),
			Widget::CheckboxInput => Value::Bool(is_checked(&value)),
			_ => coerce_text(value),
		}
	}
}

fn coerce_text(value: Value) -> Value {
	match value {
		Value::Number(n) => Value::String(n.to_string()),
		Value::Bool(b) => Value::String(b.to_string()),
		other => other,
	}
}

fn coerce_number(value: Value) -> Value {
	let Value::String(raw) = value else {
		return value;
	};
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Value::Null;
	}
	if let Ok(n) = trimmed.parse::<i64>() {
		return Value::Number(n.into());
	}
	match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
		Some(n) => Value::Number(n),
		None => Value::String(raw),
	}
}

fn is_checked(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		Value::String(s) => !matches!(
			s.trim().to_ascii_lowercase().as_str(),
			"" | "0" | "false" | "off"
		),
		Value::Array(_) | Value::Object(_) => true,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_widget_keys_round_trip() {
		for widget in Widget::ALL {
			assert_eq!(Widget::from_key(widget.key()), Some(widget));
		}
	}

	#[rstest]
	#[case(json!("42"), json!(42))]
	#[case(json!(" 7 "), json!(7))]
	#[case(json!("2.5"), json!(2.5))]
	#[case(json!(""), json!(null))]
	#[case(json!("abc"), json!("abc"))]
	#[case(json!(30), json!(30))]
	#[case(json!(null), json!(null))]
	fn test_number_coercion(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(Widget::NumberInput.coerce(input), expected);
	}

	#[rstest]
	#[case(json!(null), false)]
	#[case(json!(""), false)]
	#[case(json!("off"), false)]
	#[case(json!("False"), false)]
	#[case(json!(0), false)]
	#[case(json!("on"), true)]
	#[case(json!(1), true)]
	#[case(json!(true), true)]
	fn test_checkbox_coercion(#[case] input: Value, #[case] checked: bool) {
		assert_eq!(Widget::CheckboxInput.coerce(input), Value::Bool(checked));
	}

	#[rstest]
	#[case(Widget::TextInput)]
	#[case(Widget::EmailInput)]
	#[case(Widget::Textarea)]
	fn test_text_coercion(#[case] widget: Widget) {
		assert_eq!(widget.coerce(json!(12)), json!("12"));
		assert_eq!(widget.coerce(json!(true)), json!("true"));
		assert_eq!(widget.coerce(json!(null)), json!(null));
		assert_eq!(widget.coerce(json!("a@b.com")), json!("a@b.com"));
	}

	#[rstest]
	fn test_widget_serializes_snake_case() {
		assert_eq!(
			serde_json::to_value(Widget::CheckboxInput).unwrap(),
			json!("checkbox_input")
		);
	}
}
