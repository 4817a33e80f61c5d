use crate::error::PivotError;
use crate::loader::ModuleLoader;
use crate::module::Module;
use ahash::AHashMap;
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};

/// The shared module cache: a mapping from resolved absolute path to loaded [`Module`], backed by
/// an injected [`ModuleLoader`].
///
/// A registry is the unit of cache sharing. Binders holding the same `Arc<ModuleRegistry>` observe
/// one another's loads and evictions: a fresh load through one binder invalidates the entry for
/// all of them.
pub struct ModuleRegistry {
  loader: Box<dyn ModuleLoader>,
  cache: Mutex<AHashMap<PathBuf, Module>>,
}

impl ModuleRegistry {
  pub fn new(loader: impl ModuleLoader + 'static) -> Self {
    Self {
      loader: Box::new(loader),
      cache: Mutex::new(AHashMap::new()),
    }
  }

  /// Returns the cached module for `path`, running the loader on a miss.
  ///
  /// Load-once-cache-thereafter: repeated calls hand out clones of one cached identity and never
  /// re-run the loader until the entry is evicted. The loader runs outside the cache lock so it
  /// may itself use the registry; if two threads race a miss, both loads run but only the first
  /// insert wins.
  pub fn get_or_load(&self, path: &Path) -> Result<Module, PivotError> {
    if let Some(module) = self.cache.lock().get(path) {
      return Ok(module.clone());
    }
    let loaded = self.loader.load(path)?;
    Ok(
      self
        .cache
        .lock()
        .entry(path.to_path_buf())
        .or_insert(loaded)
        .clone(),
    )
  }

  /// Removes the entry for `path`, returning whether one was present.
  ///
  /// Effective immediately and for every holder of this registry; the next load of `path` through
  /// any binder re-runs the loader.
  pub fn evict(&self, path: &Path) -> bool {
    self.cache.lock().remove(path).is_some()
  }

  /// Returns whether `path` currently has a cached entry.
  pub fn contains(&self, path: &Path) -> bool {
    self.cache.lock().contains_key(path)
  }

  /// Number of cached entries.
  pub fn len(&self) -> usize {
    self.cache.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.cache.lock().is_empty()
  }

  /// Drops every cached entry.
  pub fn clear(&self) {
    self.cache.lock().clear();
  }
}

impl fmt::Debug for ModuleRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ModuleRegistry")
      .field("cached", &self.len())
      .finish()
  }
}
