use crate::descriptor::FieldDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("Field '{0}' is declared more than once")]
	DuplicateField(String),
	#[error("Field names must not be empty")]
	EmptyName,
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema entity: the mapping from field name to [`FieldDescriptor`]
///
/// Names are unique. Fields are kept in declaration order so snapshots and
/// logs are stable, but lookups never depend on that order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
	fields: Vec<(String, FieldDescriptor)>,
}

impl Schema {
	/// Create an empty schema
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_schema::Schema;
	///
	/// let schema = Schema::new();
	/// assert!(schema.is_empty());
	/// ```
	pub fn new() -> Self {
		Self { fields: Vec::new() }
	}

	/// Build a schema from `(name, descriptor)` pairs
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_schema::{FieldDescriptor, Schema, SchemaError};
	///
	/// let schema = Schema::from_fields([
	///     ("email", FieldDescriptor::new("email")),
	///     ("age", FieldDescriptor::new("number")),
	/// ])
	/// .unwrap();
	/// assert_eq!(schema.names().collect::<Vec<_>>(), vec!["email", "age"]);
	///
	/// let duplicate = Schema::from_fields([
	///     ("email", FieldDescriptor::new("email")),
	///     ("email", FieldDescriptor::new("text")),
	/// ]);
	/// assert_eq!(duplicate.unwrap_err(), SchemaError::DuplicateField("email".to_string()));
	/// ```
	pub fn from_fields<I, N>(fields: I) -> SchemaResult<Self>
	where
		I: IntoIterator<Item = (N, FieldDescriptor)>,
		N: Into<String>,
	{
		let mut schema = Self::new();
		for (name, descriptor) in fields {
			schema.add_field(name, descriptor)?;
		}
		Ok(schema)
	}

	/// Declare a field
	pub fn add_field(
		&mut self,
		name: impl Into<String>,
		descriptor: FieldDescriptor,
	) -> SchemaResult<()> {
		let name = name.into();
		if name.is_empty() {
			return Err(SchemaError::EmptyName);
		}
		if self.contains(&name) {
			return Err(SchemaError::DuplicateField(name));
		}
		self.fields.push((name, descriptor));
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields
			.iter()
			.find(|(field_name, _)| field_name == name)
			.map(|(_, descriptor)| descriptor)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Declared names, in declaration order
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|(name, _)| name.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
		self.fields
			.iter()
			.map(|(name, descriptor)| (name.as_str(), descriptor))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn signup_schema() -> Schema {
		Schema::from_fields([
			(
				"email",
				FieldDescriptor::new("email").with_default(""),
			),
			("age", FieldDescriptor::new("number").with_default(18)),
		])
		.unwrap()
	}

	#[rstest]
	fn test_schema_lookup(signup_schema: Schema) {
		assert_eq!(signup_schema.len(), 2);
		assert!(signup_schema.contains("email"));
		assert!(!signup_schema.contains("password"));
		assert_eq!(
			signup_schema.get("age").unwrap().default_value(),
			&json!(18)
		);
		assert!(signup_schema.get("password").is_none());
	}

	#[rstest]
	fn test_schema_iteration_keeps_declaration_order(signup_schema: Schema) {
		let components: Vec<_> = signup_schema
			.iter()
			.map(|(name, descriptor)| (name, descriptor.component()))
			.collect();
		assert_eq!(components, vec![("email", "email"), ("age", "number")]);
	}

	#[rstest]
	fn test_schema_rejects_duplicates(mut signup_schema: Schema) {
		let result = signup_schema.add_field("age", FieldDescriptor::new("text"));
		assert_eq!(result, Err(SchemaError::DuplicateField("age".to_string())));
		assert_eq!(signup_schema.len(), 2);
	}

	#[rstest]
	fn test_schema_rejects_empty_name() {
		let mut schema = Schema::new();
		assert_eq!(
			schema.add_field("", FieldDescriptor::new("text")),
			Err(SchemaError::EmptyName)
		);
		assert!(schema.is_empty());
	}
}
