//! Schema entities for schemaform
//!
//! This crate holds the declarative side of a form:
//! - [`Schema`]: the mapping from field name to [`FieldDescriptor`]
//! - [`FieldDescriptor`]: component key, default value, rules and extra props
//! - [`ValidationResult`]: the opaque per-field outcome of validation
//! - [`Rule`]: the capability a field uses to validate its value
//!
//! Nothing here renders or stores runtime state. See `schemaform-forms` for
//! the aggregator built on top of these types.

pub mod descriptor;
pub mod rules;
pub mod schema;
pub mod validation;

pub use descriptor::FieldDescriptor;
pub use schema::{Schema, SchemaError, SchemaResult};
pub use validation::{Rule, ValidationError, ValidationResult};
