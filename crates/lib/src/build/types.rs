//! Per-target result types.

use crate::package::PackagedArtifacts;
use crate::platform::Target;

/// How one target's build ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
  /// Binary built and packaged (signature may still be absent)
  Packaged(PackagedArtifacts),
  /// The compiler failed; nothing was packaged
  CompileFailed(String),
  /// The binary was built but compressing or checksumming it failed
  PackageFailed(String),
}

/// The outcome of building one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
  pub target: Target,
  pub outcome: TargetOutcome,
}

impl TargetReport {
  pub fn is_packaged(&self) -> bool {
    matches!(self.outcome, TargetOutcome::Packaged(_))
  }

  pub fn artifacts(&self) -> Option<&PackagedArtifacts> {
    match &self.outcome {
      TargetOutcome::Packaged(artifacts) => Some(artifacts),
      _ => None,
    }
  }
}
