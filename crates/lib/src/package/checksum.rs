//! Checksum records for compressed artifacts.

use std::path::{Path, PathBuf};

use crate::consts::CHECKSUM_EXT;
use crate::util::hash::{ChecksumRecord, HashError, hash_file};
use crate::util::{append_extension, file_name_lossy};

/// Hash `artifact` and write `<artifact>.sha256` next to it.
///
/// The record names the artifact by file name only, so the pair can be moved
/// together and checked with `sha256sum -c`.
pub fn write_checksum(artifact: &Path) -> Result<PathBuf, HashError> {
  let record = ChecksumRecord {
    digest: hash_file(artifact)?,
    file_name: file_name_lossy(artifact),
  };
  let path = append_extension(artifact, CHECKSUM_EXT);
  record.write(&path)?;
  Ok(path)
}
