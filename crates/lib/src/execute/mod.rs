//! External process execution.

pub mod cmd;

pub use cmd::{CmdError, run_tool};
