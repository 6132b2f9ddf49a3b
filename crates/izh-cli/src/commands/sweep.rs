//! Constant-stimulus response curve

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use izh_runtime::{response_curve, ResponsePoint, SerialFrame};

use super::emit;
use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};

/// Spike count for each constant stimulus level in a range
#[derive(Args, Debug)]
pub struct SweepCommand {
    /// Ticks per level
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// First stimulus level
    #[arg(long, default_value_t = 0)]
    pub from: u8,

    /// Last stimulus level (inclusive)
    #[arg(long, default_value_t = 255)]
    pub to: u8,

    /// Level increment
    #[arg(long, default_value_t = 1)]
    pub step: u8,

    /// Parameter frame (8 hex digits) loaded before every run
    #[arg(long)]
    pub frame: Option<SerialFrame>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl SweepCommand {
    pub fn execute(self, config: &CliConfig) -> CliResult<()> {
        if self.step == 0 {
            return Err(CliError::invalid_args("--step must be at least 1"));
        }
        if self.from > self.to {
            return Err(CliError::invalid_args(format!(
                "--from {} is above --to {}",
                self.from, self.to
            )));
        }

        let format = self.format.unwrap_or(config.output.format);
        let ticks = self.ticks.unwrap_or(config.simulation.ticks);
        let frame = match self.frame {
            Some(frame) => Some(frame),
            None => config.default_frame()?,
        };

        let levels: Vec<u8> = (self.from..=self.to).step_by(self.step.into()).collect();
        debug!("Sweeping {} levels over {} ticks each", levels.len(), ticks);
        let points = response_curve(&levels, ticks, frame)?;

        emit(format, self.out.as_deref(), &points, || render(&points))
    }
}

fn render(points: &[ResponsePoint]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{:>8} {:>7} {:>12}", "stimulus", "spikes", "first_spike");
    for p in points {
        let first = p
            .first_spike
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        let _ = writeln!(text, "{:>8} {:>7} {:>12}", p.stimulus, p.spikes, first);
    }
    text
}
