//! CLI command implementations for izh

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};

pub mod frame;
pub mod init;
pub mod run;
pub mod sweep;

/// izh - bit-exact fixed-point Izhikevich neuron
#[derive(Parser, Debug)]
#[command(
    name = "izh",
    version,
    about = "Bit-exact fixed-point Izhikevich neuron simulator",
    long_about = "Drives a cycle-accurate model of a single Izhikevich neuron with an \
                  8-bit stimulus and a bit-serial parameter loader. Run stimulus \
                  patterns, decode parameter frames, and sweep response curves."
)]
pub struct IzhCli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "IZH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate a stimulus pattern
    #[command(alias = "sim")]
    Run(run::RunCommand),

    /// Decode a 4-byte parameter frame
    Frame(frame::FrameCommand),

    /// Spike count for a range of constant stimulus levels
    Sweep(sweep::SweepCommand),

    /// Write a default configuration file
    Init(init::InitCommand),
}

impl IzhCli {
    /// Execute the CLI command
    pub fn execute(self) -> CliResult<()> {
        match self.command {
            Commands::Init(cmd) => cmd.execute(self.config),
            Commands::Run(cmd) => cmd.execute(&CliConfig::resolve(self.config.as_deref())?),
            Commands::Frame(cmd) => cmd.execute(&CliConfig::resolve(self.config.as_deref())?),
            Commands::Sweep(cmd) => cmd.execute(&CliConfig::resolve(self.config.as_deref())?),
        }
    }
}

/// Write `value` in the requested format, to `out` or stdout.
///
/// Text goes through `render`; bincode needs a file.
pub(crate) fn emit<T: Serialize>(
    format: OutputFormat,
    out: Option<&Path>,
    value: &T,
    render: impl FnOnce() -> String,
) -> CliResult<()> {
    let bytes = match format {
        OutputFormat::Text => render().into_bytes(),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(value).map_err(CliError::export)?;
            text.push('\n');
            text.into_bytes()
        }
        OutputFormat::Bincode => {
            if out.is_none() {
                return Err(CliError::invalid_args("bincode output requires --out"));
            }
            bincode::serialize(value).map_err(CliError::export)?
        }
    };

    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &bytes)?;
            tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&bytes)?;
        }
    }
    Ok(())
}
