//! Implementation of the `crossrel verify` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use crossrel_lib::verify::{RecordCheck, verify_outputs};
use tracing::{error, info};

use super::layout;

/// Re-hash every packaged archive and compare against its `.sha256` record.
///
/// Exits with status 1 if any record fails or no records are found.
pub fn cmd_verify(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
  let root = match output {
    Some(root) => root,
    None => layout(config_path)?.0,
  };

  let checks = match verify_outputs(&root) {
    Ok(checks) => checks,
    Err(e) => {
      error!("{e}");
      std::process::exit(1);
    }
  };

  if checks.is_empty() {
    error!("No checksum records found under {}", root.display());
    std::process::exit(1);
  }

  let failed = checks.iter().filter(|c| !RecordCheck::is_ok(c)).count();
  if failed > 0 {
    error!("{failed} of {} checksum(s) failed", checks.len());
    std::process::exit(1);
  }

  info!("All {} checksum(s) verified.", checks.len());
  Ok(())
}
