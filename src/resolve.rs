use std::path::{Component, Path, PathBuf};

/// Strips every leading path-separator character, so `"/x/y"`, `"x/y"` and `"//x/y"` all join
/// identically onto a base.
pub(crate) fn strip_leading_separators(sub_path: &str) -> &str {
  sub_path.trim_start_matches(|c: char| c == '/' || c == '\\')
}

/// Lexically normalizes `path`: drops `.` segments and resolves each `..` against the component
/// before it, without touching the filesystem. `..` at the root is dropped; `..` at the head of a
/// relative path is kept.
pub(crate) fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::Prefix(prefix) => out.push(prefix.as_os_str()),
      Component::RootDir => out.push(component.as_os_str()),
      Component::CurDir => {}
      Component::ParentDir => match out.components().next_back() {
        Some(Component::Normal(_)) => {
          out.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => out.push(".."),
      },
      Component::Normal(segment) => out.push(segment),
    }
  }
  out
}
