//! Per-target build-and-package step.
//!
//! For one target this:
//! 1. Creates `<output_root>/<os>-<arch>` (idempotent)
//! 2. Runs the compiler with the target's environment overrides
//! 3. Packages the binary (see [`crate::package`])
//!
//! Failures are reported in the returned [`TargetReport`] rather than as
//! errors, since one target failing never stops the others.

pub mod types;

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use crate::config::{BuildConfig, ConfigError};
use crate::execute::{CmdError, run_tool};
use crate::package::package;
use crate::platform::Target;

pub use types::{TargetOutcome, TargetReport};

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to create output directory {}: {source}", .path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Args(#[from] ConfigError),

  #[error(transparent)]
  Compiler(#[from] CmdError),
}

/// Directory holding `target`'s artifacts.
pub fn target_dir(config: &BuildConfig, target: &Target) -> PathBuf {
  config.output_root.join(target.dir_name())
}

/// Path of the binary built for `target`.
pub fn binary_path(config: &BuildConfig, target: &Target) -> PathBuf {
  target_dir(config, target).join(target.binary_name(&config.binary_name))
}

/// Compile the binary for one target, returning its path.
pub fn compile(config: &BuildConfig, target: &Target) -> Result<PathBuf, BuildError> {
  let dir = target_dir(config, target);
  fs::create_dir_all(&dir).map_err(|source| BuildError::CreateDir { path: dir.clone(), source })?;

  let binary = binary_path(config, target);
  let args = config.compiler.resolve_args(&binary, &config.source)?;
  run_tool(
    &config.compiler.program,
    &args,
    &target.env_overrides(),
    &target.env_removals(),
  )?;
  Ok(binary)
}

/// Build and package one target.
pub fn build_target(config: &BuildConfig, target: &Target) -> TargetReport {
  info!("Building {target}");

  let outcome = match compile(config, target) {
    Err(e) => {
      error!("Failed building {target}: {e}");
      TargetOutcome::CompileFailed(e.to_string())
    }
    Ok(binary) => {
      info!("Built binary → {}", binary.display());
      match package(&binary, &config.sign) {
        Ok(artifacts) => TargetOutcome::Packaged(artifacts),
        Err(e) => {
          error!("Failed packaging {target}: {e}");
          TargetOutcome::PackageFailed(e.to_string())
        }
      }
    }
  };

  TargetReport {
    target: *target,
    outcome,
  }
}
