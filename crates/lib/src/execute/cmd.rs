//! External tool invocation.
//!
//! Every tool the pipeline drives (compiler, signer) runs through [`run_tool`]:
//! a blocking call that waits for the child to exit and maps its exit status
//! to a `Result`. There is no timeout.

use std::collections::BTreeMap;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CmdError {
  /// The program could not be started (not found, not executable, ...).
  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The program ran and exited with a non-zero status.
  #[error("{program} exited with status {code}{}", stderr_suffix(.stderr))]
  Failed { program: String, code: i32, stderr: String },

  /// The program was terminated by a signal.
  #[error("{program} was terminated by a signal{}", stderr_suffix(.stderr))]
  Killed { program: String, stderr: String },
}

fn stderr_suffix(stderr: &str) -> String {
  if stderr.is_empty() {
    String::new()
  } else {
    format!(": {stderr}")
  }
}

/// Collapse multi-line tool output onto one line for log messages.
fn one_line(output: &str) -> String {
  output
    .lines()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .collect::<Vec<_>>()
    .join("; ")
}

/// Run `program` with `args` and wait for it to exit.
///
/// The child inherits a copy of this process's environment with `env`
/// layered on top and every variable in `remove` cleared. Both apply to this
/// child only; the parent environment is left untouched, so sibling
/// invocations never see them.
///
/// # Returns
///
/// The trimmed stdout of the program on success.
pub fn run_tool(
  program: &str,
  args: &[String],
  env: &BTreeMap<String, String>,
  remove: &[&str],
) -> Result<String, CmdError> {
  debug!(program = %program, args = ?args, env = ?env, remove = ?remove, "spawning process");

  let mut command = Command::new(program);
  command.args(args);
  for var in remove {
    command.env_remove(var);
  }
  let output = command
    .envs(env)
    .output()
    .map_err(|source| CmdError::Spawn {
      program: program.to_string(),
      source,
    })?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stdout.trim().is_empty() {
    debug!(stdout = %stdout.trim(), "command stdout");
  }
  if !stderr.trim().is_empty() {
    debug!(stderr = %stderr.trim(), "command stderr");
  }

  match output.status.code() {
    Some(0) => Ok(stdout.trim().to_string()),
    Some(code) => Err(CmdError::Failed {
      program: program.to_string(),
      code,
      stderr: one_line(&stderr),
    }),
    None => Err(CmdError::Killed {
      program: program.to_string(),
      stderr: one_line(&stderr),
    }),
  }
}
