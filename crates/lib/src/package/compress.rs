//! xz compression of built binaries.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use xz2::write::XzEncoder;

use crate::consts::{XZ_EXT, XZ_PRESET};
use crate::util::append_extension;

#[derive(Debug, Error)]
pub enum CompressError {
  #[error("failed to open {}: {source}", .path.display())]
  Open {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Compress `input` into `<input>.xz` next to it, replacing any existing file.
///
/// On failure the partially written archive is removed so that a `.xz` on
/// disk is always complete.
pub fn compress_xz(input: &Path) -> Result<PathBuf, CompressError> {
  let output = append_extension(input, XZ_EXT);

  match write_xz(input, &output) {
    Ok(()) => Ok(output),
    Err(err) => {
      match fs::remove_file(&output) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
          debug!(path = %output.display(), error = %e, "failed to remove partial archive");
        }
        _ => {}
      }
      Err(err)
    }
  }
}

fn write_xz(input: &Path, output: &Path) -> Result<(), CompressError> {
  let source = File::open(input).map_err(|source| CompressError::Open {
    path: input.to_path_buf(),
    source,
  })?;
  let write_err = |source| CompressError::Write {
    path: output.to_path_buf(),
    source,
  };

  let sink = File::create(output).map_err(write_err)?;
  let mut encoder = XzEncoder::new(BufWriter::new(sink), XZ_PRESET);
  io::copy(&mut BufReader::new(source), &mut encoder).map_err(write_err)?;
  let mut sink = encoder.finish().map_err(write_err)?;
  sink.flush().map_err(write_err)
}
