use crate::value::Value;
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

/// Errors produced by module resolution, loading, and invocation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PivotError {
  /// No loadable unit exists at the resolved path.
  #[error("no module found at {}", .path.display())]
  ModuleNotFound { path: PathBuf },

  /// The loader failed while producing the module at the resolved path.
  #[error("module at {} failed to load", .path.display())]
  ModuleLoad {
    path: PathBuf,
    #[source]
    source: Arc<dyn std::error::Error + Send + Sync>,
  },

  /// Attempted to invoke a module whose loaded value is not a function.
  #[error("module at {} is not callable", .path.display())]
  NotCallable { path: PathBuf },

  /// An error value raised by an invoked module function's own body.
  ///
  /// `invoke`/`BoundFn::call` carry this through unmodified; the payload is whatever the function
  /// constructed, recoverable via [`Value::downcast_ref`].
  #[error("uncaught error from module function")]
  Throw(Value),
}

impl PivotError {
  /// Wraps a loader failure for `path`.
  pub fn module_load(
    path: impl Into<PathBuf>,
    source: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    PivotError::ModuleLoad {
      path: path.into(),
      source: Arc::new(source),
    }
  }

  /// Raises an arbitrary payload as a thrown error value.
  pub fn throw<T: Any + Send + Sync>(data: T) -> Self {
    PivotError::Throw(Value::new(data))
  }
}
