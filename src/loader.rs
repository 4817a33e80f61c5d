use crate::error::PivotError;
use crate::module::Module;
use crate::value::Value;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Host hook that produces a [`Module`] from an absolute path.
///
/// Implementations perform the actual I/O and module-body execution; the [`ModuleRegistry`]
/// decides when they run. A loader is invoked once per cached path and again after each eviction.
///
/// Errors: return [`PivotError::ModuleNotFound`] when no loadable unit exists at `path`, and
/// [`PivotError::ModuleLoad`] wrapping whatever the module body raised while executing.
///
/// [`ModuleRegistry`]: crate::ModuleRegistry
pub trait ModuleLoader: Send + Sync {
  fn load(&self, path: &Path) -> Result<Module, PivotError>;
}

impl<F> ModuleLoader for F
where
  F: Fn(&Path) -> Result<Module, PivotError> + Send + Sync,
{
  fn load(&self, path: &Path) -> Result<Module, PivotError> {
    self(path)
  }
}

/// Filesystem-backed loader: the module value is the file's UTF-8 source text.
///
/// This is the loader to reach for when the "module" is content rather than code, and it is what
/// the staleness semantics of the `*_fresh` operations are observable against: an on-disk rewrite
/// is invisible through the cache until the entry is evicted.
#[derive(Clone, Copy, Debug, Default)]
pub struct SourceLoader;

impl ModuleLoader for SourceLoader {
  fn load(&self, path: &Path) -> Result<Module, PivotError> {
    match std::fs::read_to_string(path) {
      Ok(source) => Ok(Module::from_value(Value::new(source))),
      Err(err) if err.kind() == io::ErrorKind::NotFound => Err(PivotError::ModuleNotFound {
        path: path.to_path_buf(),
      }),
      Err(err) => Err(PivotError::ModuleLoad {
        path: path.to_path_buf(),
        source: Arc::new(err),
      }),
    }
  }
}
