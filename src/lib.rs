//! # schemaform
//!
//! Schema-driven forms. A [`Schema`](schema::Schema) names each field with a
//! component, a default value, validation rules and extra props; a form built
//! from it aggregates the per-field values, errors and validation behind one
//! imperative interface.
//!
//! ## Feature Flags
//!
//! - `forms` (default) - the form aggregator ([`forms`])
//!
//! ## Quick Example
//!
//! ```
//! # #[cfg(feature = "forms")]
//! # {
//! use schemaform::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::from_fields([
//!     ("email", FieldDescriptor::new("email").with_rule(rules::required("This field is required."))),
//!     ("age", FieldDescriptor::new("number").with_default(18)),
//! ])
//! .unwrap();
//!
//! let form = create_form(schema, FormOptions::new(), &ComponentRegistry::with_builtins()).unwrap();
//! assert!(form.validate().is_some());
//!
//! form.set_values([("email", json!("a@b.com"))]).unwrap();
//! assert_eq!(form.validate(), None);
//! # }
//! ```

pub mod schema;

#[cfg(feature = "forms")]
pub mod forms;

/// Commonly used types
pub mod prelude {
	pub use schemaform_schema::{
		FieldDescriptor, Rule, Schema, SchemaError, ValidationError, ValidationResult, rules,
	};

	#[cfg(feature = "forms")]
	pub use schemaform_forms::{
		ComponentRegistry, ComponentResolver, Errors, Field, FieldComponent, FieldHandle,
		FieldProps, Form, FormDescriptor, FormError, FormOptions, FormResult, FormSettings,
		Values, Widget, create_form,
	};
}
