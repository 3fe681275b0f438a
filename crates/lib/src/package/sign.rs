//! Detached signatures via an external `gpg`-compatible signer.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SignConfig;
use crate::consts::SIGNATURE_EXT;
use crate::execute::{CmdError, run_tool};
use crate::util::append_extension;

#[derive(Debug, Error)]
pub enum SignError {
  #[error(transparent)]
  Cmd(#[from] CmdError),

  #[error("failed to remove stale signature {}: {source}", .path.display())]
  RemoveStale {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("signer exited successfully but wrote no signature to {}", .0.display())]
  Missing(PathBuf),
}

/// Produces armored detached signatures.
#[derive(Debug, Clone)]
pub struct Signer<'a> {
  config: &'a SignConfig,
}

impl<'a> Signer<'a> {
  pub fn new(config: &'a SignConfig) -> Self {
    Self { config }
  }

  /// Signer arguments for signing `input` into `output`.
  ///
  /// `--local-user` is only passed when a key identity is configured;
  /// otherwise the signer picks its default key.
  pub fn args(&self, input: &Path, output: &Path) -> Vec<String> {
    let mut args = ["--batch", "--yes", "--detach-sign", "--armor"].map(String::from).to_vec();
    if let Some(key) = &self.config.key_id {
      args.push("--local-user".to_string());
      args.push(key.clone());
    }
    args.push("--output".to_string());
    args.push(output.to_string_lossy().into_owned());
    args.push(input.to_string_lossy().into_owned());
    args
  }

  /// Sign `input`, writing `<input>.asc`.
  ///
  /// A signature left over from an earlier run is removed first, so the
  /// `.asc` file exists afterwards only if this call succeeded.
  pub fn sign(&self, input: &Path) -> Result<PathBuf, SignError> {
    let output = append_extension(input, SIGNATURE_EXT);
    match fs::remove_file(&output) {
      Err(e) if e.kind() != io::ErrorKind::NotFound => {
        return Err(SignError::RemoveStale { path: output, source: e });
      }
      _ => {}
    }

    run_tool(&self.config.program, &self.args(input, &output), &BTreeMap::new(), &[])?;

    if !output.is_file() {
      return Err(SignError::Missing(output));
    }
    Ok(output)
  }
}
