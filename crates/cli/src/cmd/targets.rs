use std::path::Path;

use anyhow::Result;
use crossrel_lib::RELEASE_TARGETS;

use super::layout;

pub fn cmd_targets(config_path: &Path) -> Result<()> {
  let (_, stem) = layout(config_path)?;

  for target in RELEASE_TARGETS {
    let variant = target
      .variant
      .map(|v| format!("  {}={}", v.var, v.value))
      .unwrap_or_default();
    println!("{}  {}{}", target.dir_name(), target.binary_name(&stem), variant);
  }

  Ok(())
}
