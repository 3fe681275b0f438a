//! crossrel-lib: cross-compile, compress, checksum and sign release binaries
//!
//! The pipeline is strictly sequential:
//! - `pipeline::run` iterates the release matrix
//! - `build::build_target` compiles one `platform::Target`
//! - `package::package` compresses, checksums and signs the binary
//!
//! `verify` re-checks the checksum records of a finished output tree.

pub mod build;
pub mod config;
pub mod consts;
pub mod execute;
pub mod package;
pub mod pipeline;
pub mod placeholder;
pub mod platform;
pub mod util;
pub mod verify;

pub use build::{TargetOutcome, TargetReport};
pub use config::BuildConfig;
pub use platform::{RELEASE_TARGETS, Target};
