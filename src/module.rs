use crate::error::PivotError;
use crate::value::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An invocable module export.
///
/// The first argument is the call's receiver ("scope"), the second the positional arguments in
/// order. Whatever error the function returns crosses the invoking operation unmodified; arbitrary
/// payloads can be raised via [`PivotError::throw`].
pub type ModuleFn = dyn Fn(Value, &[Value]) -> Result<Value, PivotError> + Send + Sync;

/// A loaded module: either a plain exported value or an exported function.
///
/// Modules are cheap to clone; a cache hit hands out another handle to the same loaded unit, never
/// a copy (see [`Module::ptr_eq`]).
#[derive(Clone)]
pub enum Module {
  Value(Value),
  Function(Arc<ModuleFn>),
}

impl Module {
  /// A non-callable module exporting `data`.
  pub fn value<T: Any + Send + Sync>(data: T) -> Self {
    Module::Value(Value::new(data))
  }

  /// A non-callable module exporting an existing [`Value`].
  pub fn from_value(value: Value) -> Self {
    Module::Value(value)
  }

  /// A callable module exporting `f`.
  pub fn function<F>(f: F) -> Self
  where
    F: Fn(Value, &[Value]) -> Result<Value, PivotError> + Send + Sync + 'static,
  {
    Module::Function(Arc::new(f))
  }

  /// Returns whether this module can be invoked.
  pub fn is_callable(&self) -> bool {
    matches!(self, Module::Function(_))
  }

  /// Borrows a value module's payload as `T`. `None` for function modules or mismatched types.
  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    match self {
      Module::Value(value) => value.downcast_ref::<T>(),
      Module::Function(_) => None,
    }
  }

  /// Identity comparison: `true` iff both handles refer to the same loaded unit.
  pub fn ptr_eq(a: &Module, b: &Module) -> bool {
    match (a, b) {
      (Module::Value(x), Module::Value(y)) => Value::ptr_eq(x, y),
      (Module::Function(x), Module::Function(y)) => Arc::ptr_eq(x, y),
      _ => false,
    }
  }
}

impl fmt::Debug for Module {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Module::Value(value) => f.debug_tuple("Value").field(value).finish(),
      Module::Function(_) => f.debug_tuple("Function").finish(),
    }
  }
}
