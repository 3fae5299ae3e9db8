//! Schema-driven forms for schemaform
//!
//! This crate turns a [`Schema`](schemaform_schema::Schema) into a [`Form`]:
//! one imperative interface over a set of per-field handles.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  render()   ┌──────────────┐  resolve()   ┌────────────────┐
//! │FormDescriptor│────────────▶│  FieldProps  │─────────────▶│ FieldComponent │
//! │ schema       │             │ name, rules, │              │  instantiate() │
//! │ options      │             │ on_change    │              └───────┬────────┘
//! └──────┬───────┘             └──────────────┘                      │
//!        │ attach(handles)                                           ▼
//!        ▼                                                  ┌─────────────────┐
//! ┌──────────────┐        delegates get/set/validate        │ dyn FieldHandle │
//! │     Form     │─────────────────────────────────────────▶│ (value, error)  │
//! └──────────────┘                                          └─────────────────┘
//! ```
//!
//! - **Form**: folds per-field operations over every declared name;
//!   [`Form::get_errors`] and [`Form::validate`] return `None` when no field
//!   has an error
//! - **FormDescriptor**: the form before its handles exist
//! - **FieldHandle**: the operations a field must provide, plus its change event
//! - **ComponentRegistry**: maps component keys to field components
//!
//! ## Example
//!
//! ```
//! use schemaform_forms::{ComponentRegistry, FormOptions, create_form};
//! use schemaform_schema::{FieldDescriptor, Schema, rules};
//! use serde_json::json;
//!
//! let schema = Schema::from_fields([
//!     (
//!         "email",
//!         FieldDescriptor::new("email")
//!             .with_default("")
//!             .with_rule(rules::email("Enter a valid email address")),
//!     ),
//!     ("age", FieldDescriptor::new("number").with_default(18)),
//! ])
//! .unwrap();
//!
//! let form = create_form(schema, FormOptions::new(), &ComponentRegistry::with_builtins()).unwrap();
//!
//! form.set_values([("email", json!("nope")), ("age", json!("30"))]).unwrap();
//! let errors = form.validate().expect("email is invalid");
//! assert!(errors["email"].is_some());
//! assert!(errors["age"].is_none());
//!
//! form.set_value("email", "a@b.com").unwrap();
//! assert_eq!(form.validate(), None);
//! assert_eq!(form.get_value("age").unwrap(), json!(30));
//! ```

pub mod callback;
pub mod component;
pub mod descriptor;
pub mod field;
pub mod form;
pub mod metadata;
pub mod settings;
pub mod widget;

pub use callback::{Callback, ChangeCallback, FieldChangeCallback};
pub use component::{
	ComponentRegistry, ComponentResolver, FieldComponent, FieldProps, WidgetComponent,
};
pub use descriptor::{FormDescriptor, create_form};
pub use field::{Field, FieldHandle};
pub use form::{Errors, Form, FormError, FormResult, Values};
pub use metadata::{FieldMetadata, FormMetadata};
pub use settings::{FormOptions, FormSettings};
pub use widget::Widget;
