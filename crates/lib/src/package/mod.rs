//! Packaging of a built binary: compress, checksum, sign.
//!
//! Each stage feeds the next. Checksum and signature files from an earlier
//! run are removed first, so a failed stage never leaves them beside a
//! missing or newer archive. Compression and checksum failures abort
//! packaging of this binary only; a signing failure is a warning and leaves
//! the archive and its checksum in place.

pub mod checksum;
pub mod compress;
pub mod sign;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::SignConfig;
use crate::consts::{CHECKSUM_EXT, SIGNATURE_EXT, XZ_EXT};
use crate::util::append_extension;
use crate::util::hash::HashError;

pub use checksum::write_checksum;
pub use compress::{CompressError, compress_xz};
pub use sign::{SignError, Signer};

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("compression failed: {0}")]
  Compress(#[from] CompressError),

  #[error("checksum failed: {0}")]
  Checksum(#[from] HashError),

  #[error("failed to remove stale {}: {source}", .path.display())]
  RemoveStale {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// The files produced for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifacts {
  pub binary: PathBuf,
  pub compressed: PathBuf,
  pub checksum: PathBuf,
  /// `None` when signing was disabled or failed
  pub signature: Option<PathBuf>,
}

/// Package a built binary.
pub fn package(binary: &Path, sign: &SignConfig) -> Result<PackagedArtifacts, PackageError> {
  let archive = append_extension(binary, XZ_EXT);
  remove_stale(&append_extension(&archive, CHECKSUM_EXT))?;
  remove_stale(&append_extension(&archive, SIGNATURE_EXT))?;

  let compressed = compress_xz(binary)?;
  info!("Compressed → {}", compressed.display());

  let checksum = write_checksum(&compressed)?;
  info!("SHA256 → {}", checksum.display());

  let signature = if sign.enabled {
    match Signer::new(sign).sign(&compressed) {
      Ok(path) => {
        info!("Signed → {}", path.display());
        Some(path)
      }
      Err(e) => {
        warn!("GPG sign failed: {e}");
        None
      }
    }
  } else {
    None
  };

  Ok(PackagedArtifacts {
    binary: binary.to_path_buf(),
    compressed,
    checksum,
    signature,
  })
}

fn remove_stale(path: &Path) -> Result<(), PackageError> {
  match fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(source) => Err(PackageError::RemoveStale {
      path: path.to_path_buf(),
      source,
    }),
  }
}
