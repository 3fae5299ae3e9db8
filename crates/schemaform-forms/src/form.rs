use crate::field::FieldHandle;
use crate::settings::FormSettings;
use schemaform_schema::{Schema, SchemaError, ValidationResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
	#[error("Field '{0}' is not declared in the schema")]
	UnknownField(String),
	#[error("No handle attached for declared fields: {}", .0.join(", "))]
	MissingHandles(Vec<String>),
	#[error("Handles attached for undeclared fields: {}", .0.join(", "))]
	UnexpectedHandles(Vec<String>),
	#[error("No component '{component}' registered for field '{field}'")]
	UnresolvedComponent { field: String, component: String },
	#[error("Schema error: {0}")]
	Schema(#[from] SchemaError),
	#[error("Invalid form settings: {0}")]
	Settings(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// Field name -> current value
pub type Values = HashMap<String, Value>;

/// Field name -> current error, `None` entries included
pub type Errors = HashMap<String, ValidationResult>;

/// `None` when no entry carries an error, otherwise the full mapping.
fn collapse(errors: Errors) -> Option<Errors> {
	if errors.values().all(Option::is_none) {
		None
	} else {
		Some(errors)
	}
}

/// A form with its field handles attached
///
/// `Form` holds no live value or error state of its own. Every operation looks up
/// the named handle and delegates to it; the whole-form operations fold the
/// per-field ones over every declared name. A `Form` is only produced by
/// [`FormDescriptor::attach`](crate::FormDescriptor::attach) (or `mount`),
/// which guarantees one handle per declared name.
pub struct Form {
	schema: Schema,
	settings: FormSettings,
	/// Handles in schema order
	fields: Vec<(String, Arc<dyn FieldHandle>)>,
	/// Values the handles held at attach time
	initial: Values,
}

impl Form {
	pub(crate) fn new(
		schema: Schema,
		settings: FormSettings,
		fields: Vec<(String, Arc<dyn FieldHandle>)>,
	) -> Self {
		let initial = fields
			.iter()
			.map(|(name, handle)| (name.clone(), handle.get_value()))
			.collect();
		Self {
			schema,
			settings,
			fields,
			initial,
		}
	}

	fn handle(&self, name: &str) -> FormResult<&Arc<dyn FieldHandle>> {
		self.fields
			.iter()
			.find(|(field_name, _)| field_name == name)
			.map(|(_, handle)| handle)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))
	}

	fn check_names<'a>(&self, mut names: impl Iterator<Item = &'a String>) -> FormResult<()> {
		match names.find(|name| !self.schema.contains(name)) {
			Some(name) => Err(FormError::UnknownField(name.clone())),
			None => Ok(()),
		}
	}

	/// Current value of one field
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{ComponentRegistry, FormError, FormOptions, create_form};
	/// use schemaform_schema::{FieldDescriptor, Schema};
	/// use serde_json::json;
	///
	/// let schema = Schema::from_fields([("name", FieldDescriptor::new("text").with_default("John"))]).unwrap();
	/// let form = create_form(schema, FormOptions::new(), &ComponentRegistry::with_builtins()).unwrap();
	///
	/// assert_eq!(form.get_value("name").unwrap(), json!("John"));
	/// assert_eq!(form.get_value("nickname"), Err(FormError::UnknownField("nickname".to_string())));
	/// ```
	pub fn get_value(&self, name: &str) -> FormResult<Value> {
		Ok(self.handle(name)?.get_value())
	}

	/// Current value of every declared field
	pub fn get_values(&self) -> Values {
		self.fields
			.iter()
			.map(|(name, handle)| (name.clone(), handle.get_value()))
			.collect()
	}

	/// Write one field and return the value it now holds
	pub fn set_value(&self, name: &str, value: impl Into<Value>) -> FormResult<Value> {
		Ok(self.handle(name)?.set_value(value.into()))
	}

	/// Write the given fields, then return the full [`get_values`](Self::get_values) snapshot
	///
	/// Fields not mentioned keep their values. Every name is checked before
	/// anything is written, so an unknown name leaves the form untouched.
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{ComponentRegistry, FormOptions, create_form};
	/// use schemaform_schema::{FieldDescriptor, Schema};
	/// use serde_json::json;
	///
	/// let schema = Schema::from_fields([
	///     ("email", FieldDescriptor::new("email")),
	///     ("age", FieldDescriptor::new("number")),
	/// ])
	/// .unwrap();
	/// let form = create_form(schema, FormOptions::new(), &ComponentRegistry::with_builtins()).unwrap();
	///
	/// let values = form.set_values([("email", json!("a@b.com")), ("age", json!(30))]).unwrap();
	/// assert_eq!(values["email"], json!("a@b.com"));
	/// assert_eq!(values["age"], json!(30));
	///
	/// assert!(form.set_values([("age", json!(31)), ("nickname", json!("x"))]).is_err());
	/// assert_eq!(form.get_value("age").unwrap(), json!(30));
	/// ```
	pub fn set_values<I, K>(&self, values: I) -> FormResult<Values>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let values: Vec<(String, Value)> = values
			.into_iter()
			.map(|(name, value)| (name.into(), value))
			.collect();
		self.check_names(values.iter().map(|(name, _)| name))?;
		for (name, value) in values {
			self.handle(&name)?.set_value(value);
		}
		Ok(self.get_values())
	}

	/// Raise a field-level change event on one field, as user input would
	///
	/// Unlike [`set_value`](Self::set_value), the field reports the change:
	/// a stock [`Field`](crate::Field) validates when validate-on-change is
	/// set and then calls `on_change_field` once with the stored value.
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{ComponentRegistry, FormOptions, create_form};
	/// use schemaform_schema::{FieldDescriptor, Schema};
	/// use serde_json::json;
	/// use std::sync::{Arc, Mutex};
	///
	/// let seen = Arc::new(Mutex::new(Vec::new()));
	/// let options = FormOptions::new().on_change_field({
	///     let seen = Arc::clone(&seen);
	///     move |name, value| seen.lock().unwrap().push((name, value))
	/// });
	/// let schema = Schema::from_fields([("age", FieldDescriptor::new("number"))]).unwrap();
	/// let form = create_form(schema, options, &ComponentRegistry::with_builtins()).unwrap();
	///
	/// assert_eq!(form.handle_change("age", "30").unwrap(), json!(30));
	/// assert_eq!(*seen.lock().unwrap(), vec![("age".to_string(), json!(30))]);
	/// ```
	pub fn handle_change(&self, name: &str, value: impl Into<Value>) -> FormResult<Value> {
		Ok(self.handle(name)?.handle_change(value.into()))
	}

	/// Current error of one field
	pub fn get_error(&self, name: &str) -> FormResult<ValidationResult> {
		Ok(self.handle(name)?.get_error())
	}

	/// Current error of every declared field
	///
	/// Returns `None` when no field has an error. Otherwise the mapping has
	/// an entry for every declared field, `None` for the valid ones.
	pub fn get_errors(&self) -> Option<Errors> {
		collapse(
			self.fields
				.iter()
				.map(|(name, handle)| (name.clone(), handle.get_error()))
				.collect(),
		)
	}

	/// Store an error on one field and return what it now holds
	pub fn set_error(&self, name: &str, error: ValidationResult) -> FormResult<ValidationResult> {
		Ok(self.handle(name)?.set_error(error))
	}

	/// Store errors on the given fields, then return [`get_errors`](Self::get_errors)
	///
	/// Names are checked up front like [`set_values`](Self::set_values).
	pub fn set_errors<I, K>(&self, errors: I) -> FormResult<Option<Errors>>
	where
		I: IntoIterator<Item = (K, ValidationResult)>,
		K: Into<String>,
	{
		let errors: Vec<(String, ValidationResult)> = errors
			.into_iter()
			.map(|(name, error)| (name.into(), error))
			.collect();
		self.check_names(errors.iter().map(|(name, _)| name))?;
		for (name, error) in errors {
			self.handle(&name)?.set_error(error);
		}
		Ok(self.get_errors())
	}

	/// Validate one field; the field stores the result as its error
	pub fn validate_field(&self, name: &str) -> FormResult<ValidationResult> {
		Ok(self.handle(name)?.validate())
	}

	/// Validate every declared field
	///
	/// Same shape as [`get_errors`](Self::get_errors): `None` when every
	/// field is valid.
	pub fn validate(&self) -> Option<Errors> {
		let errors = collapse(
			self.fields
				.iter()
				.map(|(name, handle)| (name.clone(), handle.validate()))
				.collect(),
		);
		tracing::debug!(
			fields = self.fields.len(),
			invalid = errors
				.as_ref()
				.map_or(0, |errors| errors.values().filter(|e| e.is_some()).count()),
			"form validated"
		);
		errors
	}

	/// `true` when [`validate`](Self::validate) finds no error
	pub fn is_valid(&self) -> bool {
		self.validate().is_none()
	}

	/// `true` when any field's value differs from its default
	///
	/// The default is compared as the field stored it when the form was
	/// attached, so a number field declared with `"18"` is unchanged at `18`.
	pub fn has_changed(&self) -> bool {
		self.fields
			.iter()
			.any(|(name, handle)| self.initial.get(name) != Some(&handle.get_value()))
	}

	/// Put every field back to the value it held when the form was attached
	/// and clear its error
	pub fn reset(&self) {
		for (name, handle) in &self.fields {
			if let Some(initial) = self.initial.get(name) {
				handle.set_value(initial.clone());
			}
			handle.set_error(None);
		}
		tracing::debug!(fields = self.fields.len(), "form reset");
	}

	/// Declared names, in schema order
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|(name, _)| name.as_str())
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	pub fn prefix(&self) -> &str {
		&self.settings.prefix
	}

	/// HTML name attribute of a field, with the prefix applied
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{ComponentRegistry, FormOptions, create_form};
	/// use schemaform_schema::{FieldDescriptor, Schema};
	///
	/// let schema = Schema::from_fields([("email", FieldDescriptor::new("email"))]).unwrap();
	/// let registry = ComponentRegistry::with_builtins();
	///
	/// let form = create_form(schema.clone(), FormOptions::new(), &registry).unwrap();
	/// assert_eq!(form.html_name("email").unwrap(), "email");
	///
	/// let form = create_form(schema, FormOptions::new().with_prefix("user"), &registry).unwrap();
	/// assert_eq!(form.html_name("email").unwrap(), "user-email");
	/// assert_eq!(form.id_for_label("email").unwrap(), "id_user-email");
	/// ```
	pub fn html_name(&self, name: &str) -> FormResult<String> {
		self.handle(name)?;
		if self.settings.prefix.is_empty() {
			Ok(name.to_string())
		} else {
			Ok(format!("{}-{}", self.settings.prefix, name))
		}
	}

	/// HTML id attribute of a field
	pub fn id_for_label(&self, name: &str) -> FormResult<String> {
		Ok(format!("id_{}", self.html_name(name)?))
	}
}

impl fmt::Debug for Form {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Form")
			.field("fields", &self.names().collect::<Vec<_>>())
			.field("settings", &self.settings)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::ComponentRegistry;
	use crate::descriptor::create_form;
	use crate::settings::FormOptions;
	use rstest::{fixture, rstest};
	use schemaform_schema::{FieldDescriptor, ValidationError, rules};
	use serde_json::json;

	#[fixture]
	fn form() -> Form {
		let schema = Schema::from_fields([
			(
				"username",
				FieldDescriptor::new("text")
					.with_default("")
					.with_rule(rules::required("This field is required."))
					.with_rule(rules::min_length(3, "Too short")),
			),
			(
				"age",
				FieldDescriptor::new("number")
					.with_default(18)
					.with_rule(rules::min_value(0.0, "Must be non-negative"))
					.with_rule(rules::max_value(150.0, "Must be at most 150")),
			),
			("newsletter", FieldDescriptor::new("checkbox").with_default(false)),
		])
		.unwrap();
		create_form(schema, FormOptions::new(), &ComponentRegistry::with_builtins()).unwrap()
	}

	#[rstest]
	fn test_initial_values_come_from_defaults(form: Form) {
		assert_eq!(
			form.get_values(),
			Values::from([
				("username".to_string(), json!("")),
				("age".to_string(), json!(18)),
				("newsletter".to_string(), json!(false)),
			])
		);
		assert!(!form.has_changed());
	}

	#[rstest]
	fn test_set_value_returns_coerced_value(form: Form) {
		assert_eq!(form.set_value("age", "42").unwrap(), json!(42));
		assert_eq!(form.get_value("age").unwrap(), json!(42));
		assert_eq!(form.set_value("newsletter", "on").unwrap(), json!(true));
		assert!(form.has_changed());
	}

	#[rstest]
	fn test_unknown_field_is_reported(form: Form) {
		let unknown = FormError::UnknownField("password".to_string());
		assert_eq!(form.get_value("password"), Err(unknown.clone()));
		assert_eq!(form.set_value("password", "x"), Err(unknown.clone()));
		assert_eq!(form.get_error("password"), Err(unknown.clone()));
		assert_eq!(form.set_error("password", None), Err(unknown.clone()));
		assert_eq!(form.validate_field("password"), Err(unknown.clone()));
		assert_eq!(form.html_name("password"), Err(unknown));
	}

	#[rstest]
	fn test_get_errors_collapses_when_clean(form: Form) {
		assert_eq!(form.get_errors(), None);
	}

	#[rstest]
	fn test_set_errors_keeps_every_name(form: Form) {
		let taken = Some(ValidationError::new("Username is taken"));

		let errors = form
			.set_errors([("username", taken.clone())])
			.unwrap()
			.expect("one field has an error");

		assert_eq!(errors.len(), 3);
		assert_eq!(errors["username"], taken);
		assert_eq!(errors["age"], None);
		assert_eq!(errors["newsletter"], None);

		assert_eq!(form.set_errors([("username", None)]).unwrap(), None);
	}

	#[rstest]
	fn test_set_errors_rejects_unknown_names_before_writing(form: Form) {
		let result = form.set_errors([
			("username", Some(ValidationError::new("bad"))),
			("password", Some(ValidationError::new("bad"))),
		]);

		assert_eq!(result, Err(FormError::UnknownField("password".to_string())));
		assert_eq!(form.get_errors(), None);
	}

	#[rstest]
	fn test_validate_reports_each_field(form: Form) {
		let errors = form.validate().expect("username is required");
		assert_eq!(errors["username"].as_ref().unwrap().code.as_deref(), Some("required"));
		assert_eq!(errors["age"], None);
		assert_eq!(errors["newsletter"], None);
		// Validation stored the errors on the fields
		assert_eq!(form.get_errors(), Some(errors));

		form.set_values([("username", json!("john")), ("age", json!(200))])
			.unwrap();
		let errors = form.validate().unwrap();
		assert_eq!(errors["username"], None);
		assert_eq!(errors["age"].as_ref().unwrap().message, "Must be at most 150");

		form.set_value("age", 30).unwrap();
		assert_eq!(form.validate(), None);
		assert!(form.is_valid());
	}

	#[rstest]
	fn test_validate_field_updates_only_that_field(form: Form) {
		let error = form.validate_field("username").unwrap();
		assert!(error.is_some());
		assert_eq!(form.get_error("username").unwrap(), error);
		assert_eq!(form.get_error("age").unwrap(), None);
	}

	#[rstest]
	fn test_reset_restores_defaults_and_clears_errors(form: Form) {
		form.set_values([("username", json!("jo")), ("age", json!(99))])
			.unwrap();
		assert!(form.validate().is_some());

		form.reset();

		assert!(!form.has_changed());
		assert_eq!(form.get_value("age").unwrap(), json!(18));
		assert_eq!(form.get_errors(), None);
	}

	#[rstest]
	fn test_names_follow_schema_order(form: Form) {
		assert_eq!(
			form.names().collect::<Vec<_>>(),
			vec!["username", "age", "newsletter"]
		);
		assert_eq!(form.field_count(), 3);
		assert_eq!(form.schema().len(), 3);
		assert_eq!(form.prefix(), "");
	}

	#[rstest]
	fn test_form_error_messages() {
		assert_eq!(
			FormError::MissingHandles(vec!["a".into(), "b".into()]).to_string(),
			"No handle attached for declared fields: a, b"
		);
		assert_eq!(
			FormError::UnresolvedComponent {
				field: "age".into(),
				component: "slider".into(),
			}
			.to_string(),
			"No component 'slider' registered for field 'age'"
		);
	}
}
