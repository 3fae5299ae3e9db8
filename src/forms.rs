//! Form aggregation module.
//!
//! This module provides the runtime form built from a schema: two-phase
//! construction, field handles, component resolution and whole-form
//! get/set/validate operations.
//!
//! # Examples
//!
//! ```rust
//! use schemaform::forms::{ComponentRegistry, FormOptions, create_form};
//! use schemaform::schema::{FieldDescriptor, Schema};
//!
//! let schema = Schema::from_fields([("age", FieldDescriptor::new("number"))]).unwrap();
//! let form = create_form(schema, FormOptions::new(), &ComponentRegistry::with_builtins()).unwrap();
//! assert_eq!(form.get_errors(), None);
//! ```

pub use schemaform_forms::*;
