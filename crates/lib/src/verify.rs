//! Checksum verification of a finished output tree.
//!
//! Re-hashes every artifact named by a `<os>-<arch>/*.sha256` record under the
//! output root. Signatures are not checked.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};
use walkdir::WalkDir;

use crate::consts::CHECKSUM_EXT;
use crate::util::hash::{ChecksumRecord, ContentHash, HashError, hash_file};

#[derive(Debug, Error)]
pub enum VerifyError {
  #[error("output directory {} does not exist", .0.display())]
  MissingRoot(PathBuf),

  #[error("failed to scan {}: {message}", .path.display())]
  Walk { path: PathBuf, message: String },
}

/// Result of checking one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
  Ok,
  Mismatch { expected: ContentHash, actual: ContentHash },
  /// The record or its artifact could not be read
  Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCheck {
  pub record: PathBuf,
  pub status: CheckStatus,
}

impl RecordCheck {
  pub fn is_ok(&self) -> bool {
    self.status == CheckStatus::Ok
  }
}

/// Verify every checksum record one level below `root`, sorted by path.
pub fn verify_outputs(root: &Path) -> Result<Vec<RecordCheck>, VerifyError> {
  if !root.is_dir() {
    return Err(VerifyError::MissingRoot(root.to_path_buf()));
  }

  let mut checks = Vec::new();
  let walker = WalkDir::new(root).min_depth(2).max_depth(2).sort_by_file_name();
  for entry in walker {
    let entry = entry.map_err(|e| VerifyError::Walk {
      path: root.to_path_buf(),
      message: e.to_string(),
    })?;
    let path = entry.path();
    let is_record = path.extension().is_some_and(|ext| ext == CHECKSUM_EXT);
    if !entry.file_type().is_file() || !is_record {
      continue;
    }

    let status = match check_record(path) {
      Ok(status) => status,
      Err(e) => CheckStatus::Unreadable(e.to_string()),
    };
    match &status {
      CheckStatus::Ok => info!("OK {}", path.display()),
      CheckStatus::Mismatch { expected, actual } => {
        error!("Checksum mismatch {}: expected {expected}, got {actual}", path.display())
      }
      CheckStatus::Unreadable(reason) => error!("Cannot verify {}: {reason}", path.display()),
    }

    checks.push(RecordCheck {
      record: path.to_path_buf(),
      status,
    });
  }

  Ok(checks)
}

fn check_record(path: &Path) -> Result<CheckStatus, HashError> {
  let record = ChecksumRecord::read(path)?;
  let artifact = path.with_file_name(&record.file_name);
  let actual = hash_file(&artifact)?;

  if actual == record.digest {
    Ok(CheckStatus::Ok)
  } else {
    Ok(CheckStatus::Mismatch {
      expected: record.digest,
      actual,
    })
  }
}
