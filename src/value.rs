use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Marker payload for [`Value::null`].
struct Null;

/// An opaque, dynamically typed payload exchanged with module functions.
///
/// Receivers, positional arguments, return values, and thrown error values all travel as `Value`.
/// The crate never inspects the payload; callers and module functions agree on concrete types and
/// recover them via [`Value::downcast_ref`]. Cloning is cheap (the payload is shared, not copied),
/// and two clones of the same `Value` compare identical under [`Value::ptr_eq`].
#[derive(Clone)]
pub struct Value(Arc<dyn Any + Send + Sync>);

impl Value {
  /// Wraps an arbitrary payload.
  pub fn new<T: Any + Send + Sync>(data: T) -> Self {
    Self(Arc::new(data))
  }

  /// The absent receiver. This is what a call gets as its scope when the caller has none to bind.
  pub fn null() -> Self {
    Self(Arc::new(Null))
  }

  /// Returns whether this value is the [`Value::null`] marker.
  pub fn is_null(&self) -> bool {
    self.0.is::<Null>()
  }

  /// Borrows the payload as `T`, or `None` when the payload has a different type.
  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.0.downcast_ref::<T>()
  }

  /// Returns whether the payload has type `T`.
  pub fn is<T: Any>(&self) -> bool {
    self.0.is::<T>()
  }

  /// Identity comparison: `true` iff both values share one underlying payload allocation.
  pub fn ptr_eq(a: &Value, b: &Value) -> bool {
    Arc::ptr_eq(&a.0, &b.0)
  }
}

impl Default for Value {
  fn default() -> Self {
    Value::null()
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_null() {
      return f.write_str("Value(null)");
    }
    f.debug_struct("Value")
      .field("type_id", &self.0.type_id())
      .finish()
  }
}
