use pivot_path::{ModuleRegistry, PathBinder, PivotError, SourceLoader, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn source_binder(base: &Path) -> PathBinder {
  PathBinder::with_base(Arc::new(ModuleRegistry::new(SourceLoader)), base)
}

#[test]
fn loads_file_contents_as_the_module_value() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("controller.txt"), "Yeah").unwrap();

  let binder = source_binder(dir.path());
  let module = binder.load("/controller.txt").unwrap();
  assert_eq!(
    module.downcast_ref::<String>().map(String::as_str),
    Some("Yeah"),
  );
}

#[test]
fn cached_loads_ignore_on_disk_rewrites() {
  let dir = tempfile::tempdir().unwrap();
  let file = dir.path().join("controller.txt");
  fs::write(&file, "Yeah").unwrap();

  let binder = source_binder(dir.path());
  binder.load("/controller.txt").unwrap();

  fs::write(&file, "Nope").unwrap();
  let cached = binder.load("/controller.txt").unwrap();
  assert_eq!(cached.downcast_ref::<String>().map(String::as_str), Some("Yeah"));

  let fresh = binder.load_fresh("/controller.txt").unwrap();
  assert_eq!(fresh.downcast_ref::<String>().map(String::as_str), Some("Nope"));

  // The fresh content is what the cache now holds.
  let after = binder.load("/controller.txt").unwrap();
  assert_eq!(after.downcast_ref::<String>().map(String::as_str), Some("Nope"));
}

#[test]
fn fresh_eviction_is_visible_to_other_binders() {
  let dir = tempfile::tempdir().unwrap();
  let file = dir.path().join("shared.txt");
  fs::write(&file, "Yeah").unwrap();

  let registry = Arc::new(ModuleRegistry::new(SourceLoader));
  let a = PathBinder::with_base(Arc::clone(&registry), dir.path());
  let b = PathBinder::with_base(Arc::clone(&registry), dir.path());

  a.load("/shared.txt").unwrap();
  fs::write(&file, "Nope").unwrap();

  let still_cached = b.load("/shared.txt").unwrap();
  assert_eq!(
    still_cached.downcast_ref::<String>().map(String::as_str),
    Some("Yeah"),
  );

  a.load_fresh("/shared.txt").unwrap();
  let refreshed = b.load("/shared.txt").unwrap();
  assert_eq!(
    refreshed.downcast_ref::<String>().map(String::as_str),
    Some("Nope"),
  );
}

#[test]
fn missing_files_report_module_not_found() {
  let dir = tempfile::tempdir().unwrap();
  let binder = source_binder(dir.path());
  let err = binder.load("/missing.txt").unwrap_err();
  let expected = dir.path().join("missing.txt");
  assert!(matches!(err, PivotError::ModuleNotFound { ref path } if path == &expected));
}

#[test]
fn unreadable_files_report_module_load() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("binary.bin"), [0xff, 0xfe, 0x00, 0x01]).unwrap();

  let binder = source_binder(dir.path());
  let err = binder.load("/binary.bin").unwrap_err();
  assert!(matches!(err, PivotError::ModuleLoad { .. }));
}

#[test]
fn source_modules_are_not_callable() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("data.txt"), "Yeah").unwrap();

  let binder = source_binder(dir.path());
  let err = binder.invoke("/data.txt", Value::null(), &[]).unwrap_err();
  assert!(matches!(err, PivotError::NotCallable { .. }));
}
