//! Implementation of the `crossrel build` command.

use std::path::Path;

use anyhow::{Result, bail};
use crossrel_lib::{BuildConfig, RELEASE_TARGETS, Target, pipeline};
use tracing::error;

use crate::BuildArgs;

/// Execute the build command.
///
/// Loads the config, applies command-line overrides and runs the pipeline.
/// Exits with status 1 when the config cannot be loaded, a requested target is
/// not in the matrix, or the source entry point is missing. Failed targets are
/// logged by the pipeline and do not change the exit status.
pub fn cmd_build(config_path: &Path, args: BuildArgs) -> Result<()> {
  let mut config = match BuildConfig::load(config_path) {
    Ok(config) => config,
    Err(e) => {
      error!("{e}");
      std::process::exit(1);
    }
  };

  if let Some(source) = args.source {
    config.source = source;
  }
  if let Some(output) = args.output {
    config.output_root = output;
  }
  if args.no_sign {
    config.sign.enabled = false;
  }

  let targets = match select_targets(&args.targets) {
    Ok(targets) => targets,
    Err(e) => {
      error!("{e}");
      std::process::exit(1);
    }
  };

  if pipeline::run(&config, &targets).is_err() {
    // Already logged by the pipeline
    std::process::exit(1);
  }

  Ok(())
}

/// The requested subset of the release matrix, in matrix order.
///
/// An empty request selects the whole matrix.
fn select_targets(requested: &[Target]) -> Result<Vec<Target>> {
  if requested.is_empty() {
    return Ok(RELEASE_TARGETS.to_vec());
  }

  if let Some(unknown) = requested.iter().find(|t| !RELEASE_TARGETS.contains(t)) {
    bail!("{} is not in the release matrix", unknown.dir_name());
  }

  Ok(RELEASE_TARGETS.into_iter().filter(|t| requested.contains(t)).collect())
}
