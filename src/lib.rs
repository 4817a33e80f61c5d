//! Composable path resolution with cached, pluggable module loading.
//!
//! [`PathBinder`] holds a mutable base directory and resolves caller-supplied sub-paths against
//! it. The module found at a resolved path is produced by a host-injected [`ModuleLoader`] and
//! memoized in a [`ModuleRegistry`] keyed by absolute path: repeated loads hand out one cached
//! identity until the entry is evicted. The `*_fresh` operations evict before loading, so they
//! always re-execute the loader, and the eviction is shared by every binder holding the same
//! registry.
//!
//! Loaded units ([`Module`]) are either plain values or invocable functions.
//! [`PathBinder::invoke`] calls the function with a caller-supplied receiver ("scope") and
//! positional arguments; [`PathBinder::bind`] defers the whole load-and-invoke sequence behind a
//! reusable [`BoundFn`], merging arguments captured at bind time with arguments supplied at call
//! time. A `BoundFn` resolves its sub-path at call time, so mutating the binder's base redirects
//! where the callable loads from on its next call.
//!
//! A typical embedding is a request-routing layer that resolves handler functions by path string:
//!
//! ```
//! use pivot_path::{Module, ModuleRegistry, PathBinder, PivotError, Value};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! fn handlers(path: &Path) -> Result<Module, PivotError> {
//!   let name = path.display().to_string();
//!   Ok(Module::function(move |_scope, args| {
//!     Ok(Value::new(format!("{name}?args={n}", n = args.len())))
//!   }))
//! }
//!
//! let registry = Arc::new(ModuleRegistry::new(handlers));
//! let binder = PathBinder::with_base(registry, "/srv/app");
//! let out = binder.invoke("/routes/index", Value::null(), &[Value::new(1u32)])?;
//! assert_eq!(
//!   out.downcast_ref::<String>().map(String::as_str),
//!   Some("/srv/app/routes/index?args=1"),
//! );
//! # Ok::<(), PivotError>(())
//! ```

mod binder;
mod error;
mod loader;
mod module;
mod registry;
mod resolve;
mod value;

pub use crate::binder::BoundFn;
pub use crate::binder::PathBinder;
pub use crate::error::PivotError;
pub use crate::loader::ModuleLoader;
pub use crate::loader::SourceLoader;
pub use crate::module::Module;
pub use crate::module::ModuleFn;
pub use crate::registry::ModuleRegistry;
pub use crate::value::Value;
