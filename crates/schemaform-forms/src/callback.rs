//! Change callbacks.
//!
//! [`Callback`] wraps a function in an `Arc`, so it can be cloned into every
//! field a form renders without copying the closure.

use serde_json::Value;
use std::sync::Arc;

/// A cloneable callback wrapper.
///
/// ## Type Parameters
///
/// - `Args`: The argument the callback receives
/// - `Ret`: The return type of the callback (defaults to `()`)
///
/// ## Example
///
/// ```
/// use schemaform_forms::Callback;
///
/// let double = Callback::new(|n: i32| n * 2);
/// let cloned = double.clone();
/// assert_eq!(cloned.call(21), 42);
/// ```
pub struct Callback<Args, Ret = ()> {
	inner: Arc<dyn Fn(Args) -> Ret + Send + Sync + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + Send + Sync + 'static,
	{
		Self { inner: Arc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

/// Field-level change callback, receives the new value
pub type FieldChangeCallback = Callback<Value>;

/// Form-level change callback, receives `(field name, new value)`
pub type ChangeCallback = Callback<(String, Value)>;
