use std::fmt;
use std::str::FromStr;

/// CPU architectures in the release matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  Amd64,
  Arm64,
  /// 32-bit ARM, built for a specific ISA revision (see [`ArchVariant`])
  Arm,
}

/// Environment variable selecting the 32-bit ARM revision.
pub const VARIANT_ENV: &str = "GOARM";

/// An environment override selecting an instruction-set revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArchVariant {
  pub var: &'static str,
  pub value: &'static str,
}

impl Arch {
  /// Returns the `GOARCH` identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Amd64 => "amd64",
      Self::Arm64 => "arm64",
      Self::Arm => "arm",
    }
  }

  /// Variant override for this architecture, if it needs one.
  ///
  /// 32-bit ARM targets ARMv6 so the binaries run on older single-board computers.
  pub const fn variant(&self) -> Option<ArchVariant> {
    match self {
      Self::Arm => Some(ArchVariant {
        var: VARIANT_ENV,
        value: "6",
      }),
      Self::Amd64 | Self::Arm64 => None,
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Arch {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "amd64" => Ok(Self::Amd64),
      "arm64" => Ok(Self::Arm64),
      "arm" => Ok(Self::Arm),
      other => Err(other.to_string()),
    }
  }
}
