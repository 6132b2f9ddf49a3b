//! Simulate one stimulus pattern

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{ArgGroup, Args};
use tracing::info;

use izh_runtime::{
    SerialFrame, SimulationEngine, SimulationParams, SimulationResult, StimulusPattern,
};

use super::emit;
use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;

/// Simulate a stimulus pattern and print or export the result
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("pattern").args(["stimulus", "steps", "noise"])))]
pub struct RunCommand {
    /// Ticks to simulate after reset
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Constant stimulus level
    #[arg(short, long)]
    pub stimulus: Option<u8>,

    /// Step schedule as tick:level pairs, e.g. 0:0,100:50
    #[arg(long)]
    pub steps: Option<String>,

    /// Uniform noise in 0..=MAX
    #[arg(long, value_name = "MAX")]
    pub noise: Option<u8>,

    /// Seed for --noise
    #[arg(long, requires = "noise")]
    pub seed: Option<u64>,

    /// Parameter frame (8 hex digits) loaded before the run
    #[arg(long)]
    pub frame: Option<SerialFrame>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Include the per-tick trace in text output
    #[arg(long)]
    pub trace: bool,
}

impl RunCommand {
    pub fn execute(self, config: &CliConfig) -> CliResult<()> {
        let format = self.format.unwrap_or(config.output.format);
        let ticks = self.ticks.unwrap_or(config.simulation.ticks);
        let frame = match self.frame {
            Some(frame) => Some(frame),
            None => config.default_frame()?,
        };

        let pattern = self.pattern(config)?;
        let mut params = SimulationParams::new(ticks)?
            .with_trace(self.trace || format != OutputFormat::Text);
        params.frame = frame;

        info!("Running {} ticks with {:?}", ticks, pattern);
        let result = SimulationEngine::new(params)?.run(&pattern)?;

        emit(format, self.out.as_deref(), &result, || {
            render(&result, self.trace)
        })
    }

    fn pattern(&self, config: &CliConfig) -> CliResult<StimulusPattern> {
        let pattern = if let Some(steps) = &self.steps {
            StimulusPattern::parse_steps(steps)?
        } else if let Some(max) = self.noise {
            StimulusPattern::Noise {
                max,
                seed: self.seed.unwrap_or(0),
            }
        } else {
            StimulusPattern::Constant(self.stimulus.unwrap_or(config.simulation.stimulus))
        };
        Ok(pattern)
    }
}

fn render(result: &SimulationResult, with_trace: bool) -> String {
    let p = &result.final_params;
    let mut text = String::new();
    let _ = writeln!(text, "ticks:       {}", result.ticks_executed);
    let _ = writeln!(
        text,
        "params:      a={} b={} c={} d={}",
        p.a.to_raw(),
        p.b.to_raw(),
        p.c.to_raw(),
        p.d.to_raw()
    );
    let _ = writeln!(
        text,
        "spikes:      {} ({:.2} per 1000 ticks)",
        result.total_spikes,
        result.spike_rate()
    );
    let ticks: Vec<String> = result.spike_ticks.iter().map(u64::to_string).collect();
    let _ = writeln!(text, "spike ticks: {}", ticks.join(" "));
    let _ = writeln!(
        text,
        "final state: v={} u={}",
        result.final_state.v.to_raw(),
        result.final_state.u.to_raw()
    );
    if with_trace {
        text.push('\n');
        text.push_str(&result.trace.to_string());
    }
    text
}
