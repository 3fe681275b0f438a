//! Shared utilities.
//!
//! Common utilities used across the crate including hashing and test helpers.

pub mod hash;

#[cfg(test)]
pub mod testutil;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Append `.ext` to a path without replacing an existing extension.
///
/// `main.exe` becomes `main.exe.xz`, where `Path::with_extension` would give `main.xz`.
pub fn append_extension(path: &Path, ext: &str) -> PathBuf {
  let mut name = OsString::from(path.as_os_str());
  name.push(".");
  name.push(ext);
  PathBuf::from(name)
}

/// File name of `path` as UTF-8, lossily converted.
pub fn file_name_lossy(path: &Path) -> String {
  path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default()
}
