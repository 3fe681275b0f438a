//! Shared helpers for pipeline tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crossrel_lib::config::{CompilerConfig, SignConfig};
use crossrel_lib::BuildConfig;
use tempfile::TempDir;

/// Isolated workspace: a source file, an output root and tool doubles.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.go"), "package main\n\nfunc main() {}\n").unwrap();
    fs::create_dir_all(temp.path().join("env")).unwrap();
    Self { temp }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn output_root(&self) -> PathBuf {
    self.path().join("build")
  }

  /// Environment snapshot the fake compiler took for `<os>-<arch>`.
  pub fn env_snapshot(&self, dir_name: &str) -> Vec<String> {
    fs::read_to_string(self.path().join("env").join(format!("{dir_name}.env")))
      .unwrap()
      .lines()
      .map(String::from)
      .collect()
  }

  fn script(&self, name: &str, body: &str) -> PathBuf {
    let path = self.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Compiler double failing for the `<os>-<arch>` names in `failing`.
  pub fn compiler(&self, failing: &[&str]) -> PathBuf {
    let pattern = if failing.is_empty() {
      "__none__".to_string()
    } else {
      failing.join("|")
    };
    let body = format!(
      r#"out="$3"
env | sort > "{env}/$GOOS-$GOARCH.env"
case "$GOOS-$GOARCH" in
  {pattern}) echo "compile error" >&2; exit 1 ;;
esac
printf '%s\n' "binary for $GOOS/$GOARCH" > "$out"
"#,
      env = self.path().join("env").display(),
    );
    self.script("fake-go", &body)
  }

  /// Signer double; writes `--output` when `succeed`, exits 2 otherwise.
  pub fn signer(&self, succeed: bool) -> PathBuf {
    let action = if succeed {
      r#"printf '%s\n' '-----BEGIN PGP SIGNATURE-----' 'fake' '-----END PGP SIGNATURE-----' > "$out""#
    } else {
      "exit 2"
    };
    let body = format!(
      r#"out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "--output" ]; then out="$2"; fi
  shift
done
{action}
"#
    );
    self.script("fake-gpg", &body)
  }

  pub fn config(&self, failing: &[&str], sign_succeeds: bool) -> BuildConfig {
    BuildConfig {
      source: self.path().join("main.go"),
      output_root: self.output_root(),
      binary_name: "main".to_string(),
      compiler: CompilerConfig {
        program: self.compiler(failing).display().to_string(),
        ..CompilerConfig::default()
      },
      sign: SignConfig {
        program: self.signer(sign_succeeds).display().to_string(),
        key_id: Some("RELEASEKEY".to_string()),
        enabled: true,
      },
    }
  }
}

/// Sorted file names inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}
