//! Release orchestration.
//!
//! Runs the per-target step for every requested target, in order, one at a
//! time. A target failing is logged and the run moves on; only a missing
//! source entry point stops the run, and it does so before any target.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use crate::build::{TargetReport, build_target};
use crate::config::BuildConfig;
use crate::platform::Target;

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("{} not found.", .0.display())]
  SourceMissing(PathBuf),
}

/// Build and package `targets` in order.
///
/// Returns one report per target. The caller decides what to do with them;
/// failed targets have already been logged.
pub fn run(config: &BuildConfig, targets: &[Target]) -> Result<Vec<TargetReport>, PipelineError> {
  info!("Start cross-build...");

  if !config.source.exists() {
    let err = PipelineError::SourceMissing(config.source.clone());
    error!("{err}");
    return Err(err);
  }

  let reports = targets.iter().map(|target| build_target(config, target)).collect();

  info!("All builds complete.");
  Ok(reports)
}
