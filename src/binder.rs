use crate::error::PivotError;
use crate::module::Module;
use crate::registry::ModuleRegistry;
use crate::resolve::{normalize, strip_leading_separators};
use crate::value::Value;
use parking_lot::RwLock;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Composes sub-paths against a mutable base directory and mediates loading and invocation of the
/// modules found there.
///
/// A binder owns no modules itself; it resolves sub-paths to absolute keys and delegates to the
/// injected [`ModuleRegistry`]. Several binders may share one registry, in which case they share
/// its cache, including the global effect of the `*_fresh` evictions.
pub struct PathBinder {
  // Shared with every BoundFn so deferred callables observe later set_base mutations.
  base: Arc<RwLock<PathBuf>>,
  registry: Arc<ModuleRegistry>,
}

impl PathBinder {
  /// A binder whose base is the process current working directory, captured as an absolute path
  /// at creation time.
  pub fn new(registry: Arc<ModuleRegistry>) -> Self {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Self::with_base(registry, cwd)
  }

  /// A binder with an explicit base path, stored as given. A relative base is absolutized against
  /// the current working directory lazily, at each [`PathBinder::resolve`].
  pub fn with_base(registry: Arc<ModuleRegistry>, base: impl Into<PathBuf>) -> Self {
    Self {
      base: Arc::new(RwLock::new(base.into())),
      registry,
    }
  }

  /// Replaces the base path, stored as given, and returns `&mut Self` for chaining.
  ///
  /// Takes effect immediately for every subsequent operation, including calls to [`BoundFn`]s
  /// produced earlier by this binder: those re-resolve against the new base on their next call.
  pub fn set_base(&mut self, base: impl Into<PathBuf>) -> &mut Self {
    *self.base.write() = base.into();
    self
  }

  /// The current base path, as stored.
  pub fn base(&self) -> PathBuf {
    self.base.read().clone()
  }

  /// Handle to the registry this binder loads through.
  pub fn registry(&self) -> &Arc<ModuleRegistry> {
    &self.registry
  }

  /// Joins `sub_path` onto the current base and lexically normalizes the result into an absolute
  /// path.
  ///
  /// Leading separator characters on `sub_path` are stripped first, so `"/x/y"` and `"x/y"`
  /// resolve identically; an empty `sub_path` resolves to the base itself. Pure with respect to
  /// the filesystem and infallible.
  pub fn resolve(&self, sub_path: &str) -> PathBuf {
    resolve_against(&self.base.read(), sub_path)
  }

  /// Loads the module at `resolve(sub_path)` through the shared cache.
  ///
  /// Repeated loads of one resolved path return the identical cached unit without re-running the
  /// loader, even if the underlying source has changed in the meantime.
  pub fn load(&self, sub_path: &str) -> Result<Module, PivotError> {
    self.registry.get_or_load(&self.resolve(sub_path))
  }

  /// Like [`PathBinder::load`], but evicts the resolved path from the shared cache first, so the
  /// loader always re-runs and the result reflects current content.
  ///
  /// The eviction is global: every other binder holding this registry loses the cached entry too.
  pub fn load_fresh(&self, sub_path: &str) -> Result<Module, PivotError> {
    let path = self.resolve(sub_path);
    self.registry.evict(&path);
    self.registry.get_or_load(&path)
  }

  /// Loads the module at `resolve(sub_path)` and calls it with receiver `scope` and `args` as
  /// positional arguments, in order.
  ///
  /// Fails with [`PivotError::NotCallable`] when the loaded module is not a function; an error
  /// returned by the function's own body propagates unmodified.
  pub fn invoke(&self, sub_path: &str, scope: Value, args: &[Value]) -> Result<Value, PivotError> {
    let path = self.resolve(sub_path);
    let module = self.registry.get_or_load(&path)?;
    call_module(&module, &path, scope, args)
  }

  /// Like [`PathBinder::invoke`], but loads via [`PathBinder::load_fresh`], re-running the module
  /// body before the call.
  pub fn invoke_fresh(
    &self,
    sub_path: &str,
    scope: Value,
    args: &[Value],
  ) -> Result<Value, PivotError> {
    let path = self.resolve(sub_path);
    self.registry.evict(&path);
    let module = self.registry.get_or_load(&path)?;
    call_module(&module, &path, scope, args)
  }

  /// Returns a reusable callable that performs the whole load-and-invoke sequence on each call,
  /// with `prepended` placed before the call-time arguments.
  ///
  /// Resolution is deferred: the callable resolves `sub_path` against the binder's base at the
  /// time it is called, so a later [`PathBinder::set_base`] redirects where it loads from. Loads
  /// go through the live cache, so the callable deliberately keeps observing the cached unit even
  /// after the target changes on storage.
  pub fn bind(&self, sub_path: &str, scope: Value, prepended: Vec<Value>) -> BoundFn {
    self.bound(sub_path, scope, prepended, false)
  }

  /// Like [`PathBinder::bind`], but every call of the returned callable evicts and re-loads the
  /// target first, observing current on-storage content.
  pub fn bind_fresh(&self, sub_path: &str, scope: Value, prepended: Vec<Value>) -> BoundFn {
    self.bound(sub_path, scope, prepended, true)
  }

  fn bound(&self, sub_path: &str, scope: Value, prepended: Vec<Value>, fresh: bool) -> BoundFn {
    BoundFn {
      base: Arc::clone(&self.base),
      registry: Arc::clone(&self.registry),
      sub_path: sub_path.to_string(),
      scope,
      prepended,
      fresh,
    }
  }
}

impl fmt::Debug for PathBinder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PathBinder")
      .field("base", &*self.base.read())
      .field("registry", &self.registry)
      .finish()
  }
}

/// A deferred load-and-invoke callable produced by [`PathBinder::bind`] /
/// [`PathBinder::bind_fresh`].
///
/// Stateless across calls except for what the shared module cache retains. Clones share the
/// originating binder's base handle and registry.
#[derive(Clone)]
pub struct BoundFn {
  base: Arc<RwLock<PathBuf>>,
  registry: Arc<ModuleRegistry>,
  sub_path: String,
  scope: Value,
  prepended: Vec<Value>,
  fresh: bool,
}

impl BoundFn {
  /// Resolves the captured sub-path against the binder's current base, loads the module there
  /// (evicting first when produced by `bind_fresh`), and calls it with the captured scope and the
  /// prepended arguments followed by `args`.
  pub fn call(&self, args: &[Value]) -> Result<Value, PivotError> {
    let path = resolve_against(&self.base.read(), &self.sub_path);
    if self.fresh {
      self.registry.evict(&path);
    }
    let module = self.registry.get_or_load(&path)?;
    let mut merged = Vec::with_capacity(self.prepended.len() + args.len());
    merged.extend(self.prepended.iter().cloned());
    merged.extend(args.iter().cloned());
    call_module(&module, &path, self.scope.clone(), &merged)
  }

  /// The sub-path this callable targets.
  pub fn sub_path(&self) -> &str {
    &self.sub_path
  }

  /// Whether each call evicts before loading.
  pub fn is_fresh(&self) -> bool {
    self.fresh
  }
}

impl fmt::Debug for BoundFn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BoundFn")
      .field("sub_path", &self.sub_path)
      .field("prepended", &self.prepended.len())
      .field("fresh", &self.fresh)
      .finish()
  }
}

fn resolve_against(base: &Path, sub_path: &str) -> PathBuf {
  let joined = base.join(strip_leading_separators(sub_path));
  let absolute = if joined.is_absolute() {
    joined
  } else {
    match env::current_dir() {
      Ok(cwd) => cwd.join(joined),
      Err(_) => joined,
    }
  };
  normalize(&absolute)
}

fn call_module(
  module: &Module,
  path: &Path,
  scope: Value,
  args: &[Value],
) -> Result<Value, PivotError> {
  match module {
    Module::Function(f) => f(scope, args),
    Module::Value(_) => Err(PivotError::NotCallable {
      path: path.to_path_buf(),
    }),
  }
}
