//! Schema entities and validation results.
//!
//! This module provides the declarative half of a form: the schema mapping
//! field names to descriptors, the rules a descriptor carries and the
//! per-field validation result type.
//!
//! # Examples
//!
//! ```rust
//! use schemaform::schema::{FieldDescriptor, Schema, rules};
//!
//! let schema = Schema::from_fields([
//!     ("username", FieldDescriptor::new("text").with_rule(rules::min_length(3, "Too short"))),
//! ])
//! .unwrap();
//! assert!(schema.contains("username"));
//! ```

pub use schemaform_schema::*;
