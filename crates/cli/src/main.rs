use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use crossrel_lib::Target;
use crossrel_lib::consts::DEFAULT_CONFIG_FILE;

mod cmd;
mod logging;

/// crossrel - cross-compile, compress, checksum and sign release binaries
#[derive(Parser)]
#[command(name = "crossrel")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the configuration file
  #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Build and package every target in the release matrix
  Build(BuildArgs),

  /// List the release matrix
  Targets,

  /// Re-check the checksum records of a finished build
  Verify {
    /// Output root to check (default: from the config file, else `build`)
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
}

#[derive(Args, Default)]
pub struct BuildArgs {
  /// Source entry point (overrides `build.source`)
  #[arg(long)]
  source: Option<PathBuf>,

  /// Output root (overrides `build.output`)
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Skip signing
  #[arg(long)]
  no_sign: bool,

  /// Only build these targets, e.g. `linux-arm64` (repeatable)
  #[arg(short = 't', long = "target", value_name = "OS-ARCH")]
  targets: Vec<Target>,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::init(cli.verbose);

  match cli.command.unwrap_or(Commands::Build(BuildArgs::default())) {
    Commands::Build(args) => cmd::cmd_build(&cli.config, args),
    Commands::Targets => cmd::cmd_targets(&cli.config),
    Commands::Verify { output } => cmd::cmd_verify(&cli.config, output),
  }
}
