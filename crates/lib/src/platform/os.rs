use std::fmt;
use std::str::FromStr;

/// Operating systems in the release matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  Windows,
}

impl Os {
  /// Returns the `GOOS` identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::Windows => "windows",
    }
  }

  /// File suffix appended to binaries built for this OS
  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Linux => "",
      Self::Windows => ".exe",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Os {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "linux" => Ok(Self::Linux),
      "windows" => Ok(Self::Windows),
      other => Err(other.to_string()),
    }
  }
}
