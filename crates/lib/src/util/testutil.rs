//! Test utilities for crossrel-lib.
//!
//! Shell-script doubles standing in for the compiler and the signer, so the
//! pipeline can run without a Go toolchain or a GPG keyring.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
  let path = dir.join(name);
  fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
  fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Behaviour of the script returned by [`fake_signer`].
#[derive(Debug, Clone, Copy)]
pub enum FakeSigner {
  /// Writes an armored signature to the `--output` path
  Succeeds,
  /// Exits with status 2 without writing anything
  Fails,
  /// Exits with status 0 without writing anything
  WritesNothing,
}

/// A gpg stand-in. Every invocation appends its arguments to `<dir>/signer.log`.
pub fn fake_signer(dir: &Path, behaviour: FakeSigner) -> PathBuf {
  let log = dir.join("signer.log");
  let action = match behaviour {
    FakeSigner::Succeeds => {
      "printf '%s\\n' '-----BEGIN PGP SIGNATURE-----' 'fake' '-----END PGP SIGNATURE-----' > \"$out\""
    }
    FakeSigner::Fails => "echo 'gpg: signing failed: No secret key' >&2\nexit 2",
    FakeSigner::WritesNothing => "exit 0",
  };
  let body = format!(
    r#"echo "$@" >> "{log}"
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "--output" ]; then out="$2"; fi
  shift
done
{action}
"#,
    log = log.display(),
  );
  write_script(dir, "fake-gpg", &body)
}

/// A `go build -o <output> <source>` stand-in.
///
/// Writes a small binary naming the target, snapshots its environment to
/// `<env_dir>/<GOOS>-<GOARCH>.env`, and fails for the directory names in `failing`.
pub fn fake_compiler(dir: &Path, env_dir: &Path, failing: &[&str]) -> PathBuf {
  let pattern = if failing.is_empty() {
    "__none__".to_string()
  } else {
    failing.join("|")
  };
  let body = format!(
    r#"out="$3"
env | sort > "{env_dir}/$GOOS-$GOARCH.env"
case "$GOOS-$GOARCH" in
  {pattern}) echo "compile error for $GOOS/$GOARCH" >&2; exit 1 ;;
esac
printf '%s\n' "binary for $GOOS/$GOARCH" > "$out"
"#,
    env_dir = env_dir.display(),
  );
  write_script(dir, "fake-go", &body)
}
