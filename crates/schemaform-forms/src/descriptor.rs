//! Two-phase form construction
//!
//! ```text
//! Schema + FormOptions
//!        │
//!        ▼
//! FormDescriptor ──render()──▶ Vec<FieldProps> ──(components)──▶ handles
//!        │                                                         │
//!        └───────────────────────attach(handles)◀──────────────────┘
//!                                     │
//!                                     ▼
//!                                   Form
//! ```
//!
//! A [`FormDescriptor`] has no handles. Handles are supplied all at once in
//! [`FormDescriptor::attach`], which checks that they cover the schema
//! exactly before handing out a [`Form`].

use crate::callback::{Callback, FieldChangeCallback};
use crate::component::{ComponentResolver, FieldProps};
use crate::field::FieldHandle;
use crate::form::{Form, FormError, FormResult};
use crate::settings::FormOptions;
use schemaform_schema::Schema;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A form before its field handles exist
#[derive(Debug, Clone)]
pub struct FormDescriptor {
	schema: Schema,
	options: FormOptions,
}

impl FormDescriptor {
	pub fn new(schema: Schema, options: FormOptions) -> Self {
		Self { schema, options }
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn options(&self) -> &FormOptions {
		&self.options
	}

	/// Change callback for one field: forwards `(name, value)` to
	/// `on_change_field` when one is configured.
	fn change_callback(&self, name: &str) -> FieldChangeCallback {
		let forward = self.options.on_change_field.clone();
		let name = name.to_string();
		Callback::new(move |value: Value| {
			if let Some(on_change_field) = &forward {
				tracing::trace!(field = %name, "forwarding field change");
				on_change_field.call((name.clone(), value));
			}
		})
	}

	/// Render props for every declared field, in schema order
	///
	/// Each call builds fresh change callbacks.
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{FormDescriptor, FormOptions};
	/// use schemaform_schema::{FieldDescriptor, Schema};
	///
	/// let schema = Schema::from_fields([
	///     ("email", FieldDescriptor::new("email").with_default("")),
	///     ("age", FieldDescriptor::new("number")),
	/// ])
	/// .unwrap();
	/// let descriptor = FormDescriptor::new(schema, FormOptions::new().validate_on_change(true));
	///
	/// let props = descriptor.render();
	/// assert_eq!(props.len(), 2);
	/// assert_eq!(props[0].name, "email");
	/// assert_eq!(props[1].component, "number");
	/// assert!(props.iter().all(|p| p.validate_on_change));
	/// ```
	pub fn render(&self) -> Vec<FieldProps> {
		let props: Vec<FieldProps> = self
			.schema
			.iter()
			.map(|(name, descriptor)| {
				FieldProps::from_descriptor(name, descriptor, self.change_callback(name))
					.validate_on_change(self.options.settings.validate_on_change)
			})
			.collect();
		tracing::debug!(fields = props.len(), "form rendered");
		props
	}

	/// Attach one handle per declared field and produce the [`Form`]
	///
	/// # Errors
	///
	/// - [`FormError::MissingHandles`] when a declared field has no handle
	/// - [`FormError::UnexpectedHandles`] when a handle names no declared field
	pub fn attach<K>(self, handles: HashMap<K, Arc<dyn FieldHandle>>) -> FormResult<Form>
	where
		K: Into<String>,
	{
		let mut handles: HashMap<String, Arc<dyn FieldHandle>> = handles
			.into_iter()
			.map(|(name, handle)| (name.into(), handle))
			.collect();

		let missing: Vec<String> = self
			.schema
			.names()
			.filter(|name| !handles.contains_key(*name))
			.map(str::to_string)
			.collect();
		if !missing.is_empty() {
			tracing::warn!(?missing, "attach rejected: fields without handles");
			return Err(FormError::MissingHandles(missing));
		}

		let mut unexpected: Vec<String> = handles
			.keys()
			.filter(|name| !self.schema.contains(name))
			.cloned()
			.collect();
		if !unexpected.is_empty() {
			unexpected.sort();
			tracing::warn!(?unexpected, "attach rejected: handles for undeclared fields");
			return Err(FormError::UnexpectedHandles(unexpected));
		}

		let fields = self
			.schema
			.names()
			.filter_map(|name| {
				handles
					.remove(name)
					.map(|handle| (name.to_string(), handle))
			})
			.collect::<Vec<_>>();
		tracing::debug!(fields = fields.len(), "field handles attached");
		Ok(Form::new(self.schema, self.options.settings, fields))
	}

	/// Render, resolve every field's component, instantiate the handles and attach them
	///
	/// # Errors
	///
	/// [`FormError::UnresolvedComponent`] when the resolver knows no
	/// component for a descriptor.
	pub fn mount<R>(self, resolver: &R) -> FormResult<Form>
	where
		R: ComponentResolver + ?Sized,
	{
		let mut handles = HashMap::with_capacity(self.schema.len());
		for ((_, descriptor), props) in self.schema.iter().zip(self.render()) {
			let Some(component) = resolver.resolve(descriptor) else {
				tracing::warn!(
					field = %props.name,
					component = %props.component,
					"no component registered"
				);
				return Err(FormError::UnresolvedComponent {
					field: props.name,
					component: props.component,
				});
			};
			let name = props.name.clone();
			handles.insert(name, component.instantiate(props));
		}
		self.attach(handles)
	}
}

/// Build a form from a schema in one step
///
/// Shorthand for `FormDescriptor::new(schema, options).mount(resolver)`.
///
/// # Examples
///
/// ```
/// use schemaform_forms::{ComponentRegistry, FormOptions, create_form};
/// use schemaform_schema::{FieldDescriptor, Schema, rules};
///
/// let schema = Schema::from_fields([
///     ("email", FieldDescriptor::new("email").with_rule(rules::email("Enter a valid email address"))),
///     ("age", FieldDescriptor::new("number")),
/// ])
/// .unwrap();
///
/// let form = create_form(schema, FormOptions::new(), &ComponentRegistry::with_builtins()).unwrap();
/// assert_eq!(form.validate(), None);
/// ```
pub fn create_form<R>(schema: Schema, options: FormOptions, resolver: &R) -> FormResult<Form>
where
	R: ComponentResolver + ?Sized,
{
	FormDescriptor::new(schema, options).mount(resolver)
}
