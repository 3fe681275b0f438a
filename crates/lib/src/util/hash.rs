//! SHA-256 hashing and checksum records.
//!
//! This module provides:
//! - `ContentHash`: A full 64-character hash for content verification
//! - `hash_file()`: Streaming single file hashing
//! - `hash_bytes()`: Arbitrary byte hashing
//! - `ChecksumRecord`: The `<digest>  <filename>` line written beside artifacts

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::consts::CHECKSUM_CHUNK_SIZE;

/// A full 64-character SHA256 hash.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(pub String);

impl fmt::Display for ContentHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Error)]
pub enum HashError {
  #[error("failed to read {}: {source}", .path.display())]
  ReadFile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {}: {source}", .path.display())]
  WriteFile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed checksum record: {0:?}")]
  MalformedRecord(String),
}

/// Hash a file's contents.
///
/// Reads at most `CHECKSUM_CHUNK_SIZE` bytes at a time, so memory use does not
/// depend on the file size.
pub fn hash_file(path: &Path) -> Result<ContentHash, HashError> {
  let read_err = |source| HashError::ReadFile {
    path: path.to_path_buf(),
    source,
  };

  let mut file = fs::File::open(path).map_err(read_err)?;
  let mut hasher = Sha256::new();
  let mut buffer = [0u8; CHECKSUM_CHUNK_SIZE];

  loop {
    let bytes_read = file.read(&mut buffer).map_err(read_err)?;
    if bytes_read == 0 {
      break;
    }
    hasher.update(&buffer[..bytes_read]);
  }

  Ok(ContentHash(format!("{:x}", hasher.finalize())))
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(format!("{:x}", hasher.finalize()))
}

/// One line of a `.sha256` file, in the format `sha256sum` reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
  pub digest: ContentHash,
  pub file_name: String,
}

impl ChecksumRecord {
  /// Render as `<digest><two spaces><file_name>\n`
  pub fn to_line(&self) -> String {
    format!("{}  {}\n", self.digest, self.file_name)
  }

  /// Parse a record line; a trailing newline is optional.
  ///
  /// The file name must be a bare sibling name: path separators, `.` and `..`
  /// are rejected.
  pub fn parse(line: &str) -> Result<Self, HashError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let malformed = || HashError::MalformedRecord(line.to_string());

    let (digest, file_name) = line.split_once("  ").ok_or_else(malformed)?;
    let is_hex = digest.len() == 64 && digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    let is_bare_name = !matches!(file_name, "" | "." | "..") && !file_name.contains(['/', '\\']);
    if !is_hex || !is_bare_name {
      return Err(malformed());
    }

    Ok(Self {
      digest: ContentHash(digest.to_string()),
      file_name: file_name.to_string(),
    })
  }

  /// Read and parse the single record stored in a `.sha256` file.
  pub fn read(path: &Path) -> Result<Self, HashError> {
    let content = fs::read_to_string(path).map_err(|source| HashError::ReadFile {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&content)
  }

  /// Write this record to `path`, replacing any existing file.
  pub fn write(&self, path: &Path) -> Result<(), HashError> {
    fs::write(path, self.to_line()).map_err(|source| HashError::WriteFile {
      path: path.to_path_buf(),
      source,
    })
  }
}
