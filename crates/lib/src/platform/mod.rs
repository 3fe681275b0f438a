pub mod arch;
pub mod os;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use arch::{Arch, ArchVariant, VARIANT_ENV};
pub use os::Os;

/// Environment variable selecting the target operating system.
pub const OS_ENV: &str = "GOOS";

/// Environment variable selecting the target architecture.
pub const ARCH_ENV: &str = "GOARCH";

/// One entry of the release matrix (e.g., "linux/arm" with `GOARM=6`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
  pub os: Os,
  pub arch: Arch,
  pub variant: Option<ArchVariant>,
}

/// Every target a release is built for, in build order.
pub const RELEASE_TARGETS: [Target; 5] = [
  Target::new(Os::Windows, Arch::Amd64),
  Target::new(Os::Windows, Arch::Arm64),
  Target::new(Os::Linux, Arch::Amd64),
  Target::new(Os::Linux, Arch::Arm64),
  Target::new(Os::Linux, Arch::Arm),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetParseError {
  #[error("expected <os>-<arch>, got '{0}'")]
  Malformed(String),

  #[error("unsupported operating system '{0}'")]
  UnknownOs(String),

  #[error("unsupported architecture '{0}'")]
  UnknownArch(String),
}

impl Target {
  /// Create a target, looking up its architecture variant
  pub const fn new(os: Os, arch: Arch) -> Self {
    Self {
      os,
      arch,
      variant: arch.variant(),
    }
  }

  /// Directory name holding this target's artifacts (e.g., "linux-amd64")
  pub fn dir_name(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }

  /// Binary file name for this target (e.g., "main-windows-amd64.exe")
  pub fn binary_name(&self, stem: &str) -> String {
    format!("{}-{}-{}{}", stem, self.os, self.arch, self.os.exe_suffix())
  }

  /// Environment overrides applied to this target's compiler invocation only.
  pub fn env_overrides(&self) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert(OS_ENV.to_string(), self.os.as_str().to_string());
    env.insert(ARCH_ENV.to_string(), self.arch.as_str().to_string());
    if let Some(variant) = self.variant {
      env.insert(variant.var.to_string(), variant.value.to_string());
    }
    env
  }

  /// Variables removed from this target's compiler environment.
  ///
  /// A variant variable inherited from the caller must not reach targets that
  /// do not set it themselves.
  pub fn env_removals(&self) -> Vec<&'static str> {
    match self.variant {
      Some(_) => Vec::new(),
      None => vec![VARIANT_ENV],
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.os, self.arch)
  }
}

impl FromStr for Target {
  type Err = TargetParseError;

  /// Parses the directory form, `<os>-<arch>`
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (os, arch) = s.split_once('-').ok_or_else(|| TargetParseError::Malformed(s.to_string()))?;
    let os = os.parse::<Os>().map_err(TargetParseError::UnknownOs)?;
    let arch = arch.parse::<Arch>().map_err(TargetParseError::UnknownArch)?;
    Ok(Self::new(os, arch))
  }
}
