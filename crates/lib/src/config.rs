//! Build configuration.
//!
//! The configuration is read once at startup from a TOML file and then passed
//! by reference to every stage. Only the `[gpg]` table with its `key_id` is
//! required; every other setting has a default.
//!
//! ```toml
//! [build]
//! source = "main.go"
//! output = "build"
//! binary_name = "main"
//!
//! [compiler]
//! program = "go"
//! args = ["build", "-o", "{output}", "{source}"]
//!
//! [gpg]
//! key_id = "0xDEADBEEF"
//! program = "gpg"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::placeholder::{self, PlaceholderError, Substitutions};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config file {}{}: {}", .path.display(), location_suffix(.location), .source.message())]
  Parse {
    path: PathBuf,
    location: Option<Location>,
    #[source]
    source: toml::de::Error,
  },

  #[error("invalid config{}: {}", location_suffix(.location), .source.message())]
  Toml {
    location: Option<Location>,
    #[source]
    source: toml::de::Error,
  },

  #[error("invalid compiler argument {arg:?}: {source}")]
  CompilerArg {
    arg: String,
    #[source]
    source: PlaceholderError,
  },

  #[error("{0} must not be empty")]
  Empty(&'static str),
}

/// 1-based position of a TOML error within the config text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
  pub line: usize,
  pub column: usize,
}

impl Location {
  fn at(content: &str, offset: usize) -> Self {
    let before = content.get(..offset).unwrap_or(content);
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Self {
      line: before.matches('\n').count() + 1,
      column: before[line_start..].chars().count() + 1,
    }
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

fn location_suffix(location: &Option<Location>) -> String {
  location.map(|l| format!(":{l}")).unwrap_or_default()
}

/// How to invoke the compiler for one target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
  pub program: String,
  /// Argument templates; see [`crate::placeholder`]
  pub args: Vec<String>,
}

impl Default for CompilerConfig {
  fn default() -> Self {
    Self {
      program: "go".to_string(),
      args: ["build", "-o", "{output}", "{source}"].map(String::from).to_vec(),
    }
  }
}

impl CompilerConfig {
  /// Resolve the argument templates for one invocation.
  pub fn resolve_args(&self, output: &Path, source: &Path) -> Result<Vec<String>, ConfigError> {
    let output = output.to_string_lossy();
    let source = source.to_string_lossy();
    let values = Substitutions {
      output: &output,
      source: &source,
    };

    self
      .args
      .iter()
      .map(|arg| {
        placeholder::substitute(arg, &values).map_err(|source| ConfigError::CompilerArg {
          arg: arg.clone(),
          source,
        })
      })
      .collect()
  }
}

/// Detached-signature settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignConfig {
  pub program: String,
  /// Key passed to the signer; `None` uses the signer's default key
  pub key_id: Option<String>,
  /// When false, packaging stops after the checksum
  pub enabled: bool,
}

/// Read-only configuration for a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  /// Source entry point handed to the compiler
  pub source: PathBuf,
  /// Root under which `<os>-<arch>` directories are created
  pub output_root: PathBuf,
  /// Stem of every binary name (`<stem>-<os>-<arch>`)
  pub binary_name: String,
  pub compiler: CompilerConfig,
  pub sign: SignConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  #[serde(default)]
  build: BuildSection,
  #[serde(default)]
  compiler: CompilerConfig,
  gpg: GpgSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BuildSection {
  source: PathBuf,
  output: PathBuf,
  binary_name: String,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self {
      source: PathBuf::from("main.go"),
      output: PathBuf::from("build"),
      binary_name: "main".to_string(),
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GpgSection {
  key_id: String,
  #[serde(default = "default_gpg_program")]
  program: String,
}

fn default_gpg_program() -> String {
  "gpg".to_string()
}

impl BuildConfig {
  /// Load the configuration from a TOML file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml(&content).map_err(|e| match e {
      ConfigError::Toml { location, source } => ConfigError::Parse {
        path: path.to_path_buf(),
        location,
        source,
      },
      other => other,
    })
  }

  /// Parse a configuration from TOML text.
  pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source: toml::de::Error| ConfigError::Toml {
      location: source.span().map(|span| Location::at(content, span.start)),
      source,
    })?;

    let key_id = file.gpg.key_id.trim();
    let config = Self {
      source: file.build.source,
      output_root: file.build.output,
      binary_name: file.build.binary_name,
      compiler: file.compiler,
      sign: SignConfig {
        program: file.gpg.program,
        key_id: (!key_id.is_empty()).then(|| key_id.to_string()),
        enabled: true,
      },
    };
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.binary_name.trim().is_empty() {
      return Err(ConfigError::Empty("build.binary_name"));
    }
    if self.compiler.program.trim().is_empty() {
      return Err(ConfigError::Empty("compiler.program"));
    }
    if self.sign.program.trim().is_empty() {
      return Err(ConfigError::Empty("gpg.program"));
    }
    // Surface template errors at startup rather than on the first target.
    self.compiler.resolve_args(Path::new(""), Path::new(""))?;
    Ok(())
  }
}
