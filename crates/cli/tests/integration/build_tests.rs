//! Tests for `crossrel build`.

use std::fs;

use predicates::prelude::*;

use super::common::{TestEnv, is_log_line, stdout_of};

const MATRIX_DIRS: [&str; 5] = ["windows-amd64", "windows-arm64", "linux-amd64", "linux-arm64", "linux-arm"];

#[test]
fn default_command_builds_full_matrix() {
  let env = TestEnv::new(&[], true);

  let output = env.crossrel_cmd().output().unwrap();
  assert!(output.status.success());

  for dir in MATRIX_DIRS {
    let suffix = if dir.starts_with("windows") { ".exe" } else { "" };
    let binary = env.output_root().join(dir).join(format!("main-{dir}{suffix}"));
    assert!(binary.exists(), "{}", binary.display());
    assert!(binary.with_file_name(format!("main-{dir}{suffix}.xz")).exists());
    assert!(binary.with_file_name(format!("main-{dir}{suffix}.xz.sha256")).exists());
    assert!(binary.with_file_name(format!("main-{dir}{suffix}.xz.asc")).exists());
  }

  let stdout = stdout_of(&output);
  let lines: Vec<&str> = stdout.lines().collect();
  assert!(lines.iter().all(|l| is_log_line(l)), "{stdout}");
  assert!(lines[0].ends_with("[INFO ] Start cross-build..."), "{stdout}");
  assert!(lines[lines.len() - 1].ends_with("[INFO ] All builds complete."), "{stdout}");
}

#[test]
fn builds_are_logged_in_matrix_order() {
  let env = TestEnv::new(&[], true);

  let output = env.crossrel_cmd().arg("build").output().unwrap();
  let stdout = stdout_of(&output);

  let positions: Vec<usize> = ["windows/amd64", "windows/arm64", "linux/amd64", "linux/arm64", "linux/arm"]
    .iter()
    .map(|t| stdout.find(&format!("Building {t}\n")).unwrap())
    .collect();
  assert!(positions.windows(2).all(|w| w[0] < w[1]), "{stdout}");
}

#[test]
fn missing_source_aborts_before_any_target() {
  let env = TestEnv::new(&[], true);
  fs::remove_file(env.path().join("main.go")).unwrap();

  env
    .crossrel_cmd()
    .arg("build")
    .assert()
    .failure()
    .stdout(predicate::str::contains("[ERROR] main.go not found."))
    .stdout(predicate::str::contains("All builds complete.").not());

  assert_eq!(env.compile_count(), 0);
  assert!(!env.output_root().exists());
}

#[test]
fn missing_gpg_section_is_fatal() {
  let env = TestEnv::new(&[], true);
  env.write_file("build.config.toml", "[build]\nsource = \"main.go\"\n");

  env
    .crossrel_cmd()
    .assert()
    .failure()
    .stdout(predicate::str::contains("[ERROR]").and(predicate::str::contains("gpg")));

  assert_eq!(env.compile_count(), 0);
}

#[test]
fn missing_config_file_is_fatal() {
  let env = TestEnv::new(&[], true);

  env
    .crossrel_cmd()
    .args(["--config", "nope.toml", "build"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("nope.toml"));
}

#[test]
fn compile_failure_is_scoped_to_its_target() {
  let env = TestEnv::new(&["linux-amd64"], true);

  env
    .crossrel_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("[ERROR] Failed building linux/amd64"))
    .stdout(predicate::str::contains("All builds complete."));

  assert_eq!(env.compile_count(), 5);
  assert!(!env.output_root().join("linux-amd64/main-linux-amd64.xz").exists());
  assert!(env.output_root().join("linux-arm64/main-linux-arm64.xz.sha256").exists());
  assert!(env.output_root().join("linux-arm/main-linux-arm.xz.sha256").exists());
}

#[test]
fn signing_failure_only_warns() {
  let env = TestEnv::new(&[], false);

  env
    .crossrel_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("[WARN ] GPG sign failed"));

  for dir in MATRIX_DIRS {
    let names: Vec<String> = fs::read_dir(env.output_root().join(dir))
      .unwrap()
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    assert_eq!(names.len(), 3, "{dir}: {names:?}");
    assert!(!names.iter().any(|n| n.ends_with(".asc")));
  }
}

#[test]
fn signer_receives_configured_key() {
  let env = TestEnv::new(&[], true);

  env.crossrel_cmd().args(["build", "-t", "linux-amd64"]).assert().success();

  let log = fs::read_to_string(env.path().join("signer.log")).unwrap();
  assert!(log.contains("--detach-sign --armor --local-user RELEASEKEY --output"), "{log}");
}

#[test]
fn no_sign_skips_signer() {
  let env = TestEnv::new(&[], true);

  env.crossrel_cmd().args(["build", "--no-sign"]).assert().success();

  assert!(!env.path().join("signer.log").exists());
  assert!(!env.output_root().join("linux-arm/main-linux-arm.xz.asc").exists());
  assert!(env.output_root().join("linux-arm/main-linux-arm.xz.sha256").exists());
}

#[test]
fn target_flag_selects_subset() {
  let env = TestEnv::new(&[], true);

  env
    .crossrel_cmd()
    .args(["build", "--target", "linux-arm", "-t", "windows-amd64"])
    .assert()
    .success();

  let mut dirs: Vec<String> = fs::read_dir(env.output_root())
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  dirs.sort();
  assert_eq!(dirs, vec!["linux-arm", "windows-amd64"]);
}

#[test]
fn target_outside_matrix_is_rejected() {
  let env = TestEnv::new(&[], true);

  env
    .crossrel_cmd()
    .args(["build", "-t", "windows-arm"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("not in the release matrix"));

  assert_eq!(env.compile_count(), 0);
}

#[test]
fn malformed_target_is_a_usage_error() {
  let env = TestEnv::new(&[], true);

  env
    .crossrel_cmd()
    .args(["build", "-t", "linux"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected <os>-<arch>"));
}

#[test]
fn output_override_moves_artifacts() {
  let env = TestEnv::new(&[], true);

  env
    .crossrel_cmd()
    .args(["build", "--output", "dist", "-t", "linux-arm64"])
    .assert()
    .success();

  assert!(env.path().join("dist/linux-arm64/main-linux-arm64.xz").exists());
  assert!(!env.output_root().exists());
}

#[test]
fn rerun_produces_identical_checksums() {
  let env = TestEnv::new(&[], true);

  env.crossrel_cmd().assert().success();
  let first: Vec<String> = MATRIX_DIRS
    .iter()
    .map(|d| {
      let suffix = if d.starts_with("windows") { ".exe" } else { "" };
      fs::read_to_string(env.output_root().join(d).join(format!("main-{d}{suffix}.xz.sha256"))).unwrap()
    })
    .collect();

  env.crossrel_cmd().assert().success();
  let second: Vec<String> = MATRIX_DIRS
    .iter()
    .map(|d| {
      let suffix = if d.starts_with("windows") { ".exe" } else { "" };
      fs::read_to_string(env.output_root().join(d).join(format!("main-{d}{suffix}.xz.sha256"))).unwrap()
    })
    .collect();

  assert_eq!(first, second);
}

#[test]
fn verbose_logs_tool_invocations() {
  let env = TestEnv::new(&[], true);

  env
    .crossrel_cmd()
    .args(["-v", "build", "-t", "linux-arm"])
    .assert()
    .success()
    .stdout(predicate::str::contains("[DEBUG] "))
    .stdout(predicate::str::contains("spawning process"));
}
