mod build;
mod targets;
mod verify;

pub use build::cmd_build;
pub use targets::cmd_targets;
pub use verify::cmd_verify;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossrel_lib::BuildConfig;

/// Output root and binary stem for commands that only read the output tree.
///
/// Falls back to the defaults when there is no config file.
fn layout(config_path: &Path) -> Result<(PathBuf, String)> {
  if !config_path.exists() {
    return Ok((PathBuf::from("build"), "main".to_string()));
  }
  let config = BuildConfig::load(config_path).context("Failed to load config")?;
  Ok((config.output_root, config.binary_name))
}
