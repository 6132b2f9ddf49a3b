//! Tick-driven simulation harness around a single neuron core

use izh_core::{NeuronCore, NeuronState, ParamSet, TickInputs};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::*,
    frame::SerialFrame,
    trace::{Trace, TraceSample},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Reset ticks applied before every run
pub const RESET_TICKS: u32 = 10;

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParams {
    /// Enabled ticks to execute after reset (and after the frame, if any)
    pub ticks: u64,
    /// Record a per-tick register trace
    pub record_trace: bool,
    /// Stop recording samples past this many (None = unlimited)
    pub max_recorded_samples: Option<usize>,
    /// Parameter frame clocked in before the run
    pub frame: Option<SerialFrame>,
    /// Reset ticks applied first
    pub reset_ticks: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            ticks: 1000,
            record_trace: true,
            max_recorded_samples: Some(1_000_000),
            frame: None,
            reset_ticks: RESET_TICKS,
        }
    }
}

impl SimulationParams {
    /// Create new simulation parameters with validation
    pub fn new(ticks: u64) -> Result<Self> {
        if ticks == 0 {
            return Err(RuntimeError::invalid_parameter("ticks", "0", "> 0"));
        }
        Ok(Self {
            ticks,
            ..Default::default()
        })
    }

    /// Load this frame before running
    pub fn with_frame(mut self, frame: SerialFrame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Enable or disable trace recording
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.record_trace = enabled;
        self
    }

    /// Set maximum trace length
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.max_recorded_samples = Some(limit);
        self
    }

    /// Set the number of leading reset ticks
    pub fn with_reset_ticks(mut self, reset_ticks: u32) -> Self {
        self.reset_ticks = reset_ticks;
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        Self::new(self.ticks)?;
        if self.reset_ticks == 0 {
            return Err(RuntimeError::invalid_parameter("reset_ticks", "0", ">= 1"));
        }
        Ok(())
    }
}

/// Stimulus byte presented on each tick
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StimulusPattern {
    /// Same sample every tick
    Constant(u8),
    /// Piecewise-constant schedule of `(start_tick, level)` pairs.
    ///
    /// Each level holds until the next start; ticks before the first start
    /// see 0.
    Steps(Vec<(u64, u8)>),
    /// Uniform samples in `0..=max` from a seeded generator
    Noise {
        /// Largest sample
        max: u8,
        /// Generator seed
        seed: u64,
    },
}

impl Default for StimulusPattern {
    fn default() -> Self {
        Self::Constant(0)
    }
}

impl StimulusPattern {
    /// Check the pattern is well formed
    pub fn validate(&self) -> Result<()> {
        if let Self::Steps(steps) = self {
            if steps.is_empty() {
                return Err(RuntimeError::invalid_stimulus("empty step schedule"));
            }
            if let Some(w) = steps.windows(2).find(|w| w[1].0 <= w[0].0) {
                return Err(RuntimeError::invalid_stimulus(format!(
                    "step starts must increase strictly ({} then {})",
                    w[0].0, w[1].0
                )));
            }
        }
        Ok(())
    }

    /// Parse a step schedule written as `tick:level` pairs, e.g. `0:3,100:50`
    pub fn parse_steps(text: &str) -> Result<Self> {
        let steps = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|pair| {
                let (tick, level) = pair.split_once(':').ok_or_else(|| {
                    RuntimeError::invalid_stimulus(format!("expected tick:level, got {:?}", pair))
                })?;
                let tick = tick.trim().parse::<u64>().map_err(|e| {
                    RuntimeError::invalid_stimulus(format!("bad tick {:?}: {}", tick, e))
                })?;
                let level = level.trim().parse::<u8>().map_err(|e| {
                    RuntimeError::invalid_stimulus(format!("bad level {:?}: {}", level, e))
                })?;
                Ok((tick, level))
            })
            .collect::<Result<Vec<_>>>()?;

        let pattern = Self::Steps(steps);
        pattern.validate()?;
        Ok(pattern)
    }

    fn source(&self) -> StimulusSource<'_> {
        match self {
            Self::Constant(level) => StimulusSource::Constant(*level),
            Self::Steps(steps) => StimulusSource::Steps {
                steps,
                next: 0,
                level: 0,
            },
            Self::Noise { max, seed } => StimulusSource::Noise {
                max: *max,
                rng: StdRng::seed_from_u64(*seed),
            },
        }
    }

    /// The first `ticks` samples of this pattern
    pub fn samples(&self, ticks: u64) -> Vec<u8> {
        let mut source = self.source();
        (0..ticks).map(|tick| source.sample(tick)).collect()
    }
}

/// Stateful sampler for a pattern; ticks must be visited in order
enum StimulusSource<'a> {
    Constant(u8),
    Steps {
        steps: &'a [(u64, u8)],
        next: usize,
        level: u8,
    },
    Noise {
        max: u8,
        rng: StdRng,
    },
}

impl StimulusSource<'_> {
    fn sample(&mut self, tick: u64) -> u8 {
        match self {
            Self::Constant(level) => *level,
            Self::Steps { steps, next, level } => {
                while let Some(&(start, value)) = steps.get(*next) {
                    if start > tick {
                        break;
                    }
                    *level = value;
                    *next += 1;
                }
                *level
            }
            Self::Noise { max, rng } => rng.gen_range(0..=*max),
        }
    }
}

/// Simulation results
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Ticks (0-based, counted from the first run tick) that emitted a spike
    pub spike_ticks: Vec<u64>,
    /// Total spike count
    pub total_spikes: usize,
    /// Register trace (empty unless recording was enabled)
    pub trace: Trace,
    /// Registers after the last tick
    pub final_state: NeuronState,
    /// Committed parameters after the last tick
    pub final_params: ParamSet,
    /// Number of run ticks executed
    pub ticks_executed: u64,
}

impl SimulationResult {
    /// Spikes per 1000 ticks
    pub fn spike_rate(&self) -> f64 {
        if self.ticks_executed == 0 {
            return 0.0;
        }
        self.total_spikes as f64 * 1000.0 / self.ticks_executed as f64
    }

    /// Tick of the first spike, if any
    pub fn first_spike(&self) -> Option<u64> {
        self.spike_ticks.first().copied()
    }

    /// Gaps between consecutive spikes
    pub fn inter_spike_intervals(&self) -> Vec<u64> {
        self.spike_ticks.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

/// Simulation engine
#[derive(Debug)]
pub struct SimulationEngine {
    core: NeuronCore,
    params: SimulationParams,
}

impl SimulationEngine {
    /// Create a new simulation engine
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            core: NeuronCore::new(),
            params,
        })
    }

    /// Simulation parameters
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Core as left by the last run
    pub fn core(&self) -> &NeuronCore {
        &self.core
    }

    /// Run the complete simulation under `pattern`
    pub fn run(&mut self, pattern: &StimulusPattern) -> Result<SimulationResult> {
        self.run_logged(pattern, log::Level::Info)
    }

    /// Same as [`run`](Self::run) with start and completion reported at `level`
    fn run_logged(
        &mut self,
        pattern: &StimulusPattern,
        level: log::Level,
    ) -> Result<SimulationResult> {
        pattern.validate()?;
        log::log!(
            level,
            "Starting simulation: {} ticks, stimulus {:?}",
            self.params.ticks,
            pattern
        );

        self.core = NeuronCore::new();
        for _ in 0..self.params.reset_ticks {
            self.core.tick(TickInputs::RESET);
        }
        if let Some(frame) = self.params.frame {
            frame.load(&mut self.core, 0);
        }

        let limit = self.params.max_recorded_samples.unwrap_or(usize::MAX);
        let mut trace = if self.params.record_trace {
            Trace::with_capacity(self.params.ticks.min(limit as u64).min(1 << 16) as usize)
        } else {
            Trace::new()
        };
        let mut spike_ticks = Vec::new();
        let mut source = pattern.source();
        let progress_every = (self.params.ticks / 10).max(1);

        for tick in 0..self.params.ticks {
            let outputs = self.core.tick(TickInputs::run(source.sample(tick)));
            if outputs.spike() {
                spike_ticks.push(tick);
            }

            if self.params.record_trace {
                if tick < limit as u64 {
                    trace.record(TraceSample::capture(tick, &self.core, &outputs));
                } else if tick == limit as u64 {
                    log::warn!("Trace recording limit reached: {}", limit);
                }
            }

            if tick % progress_every == 0 {
                log::debug!(
                    "Simulation progress: {:.1}%",
                    tick as f32 / self.params.ticks as f32 * 100.0
                );
            }
        }

        let result = SimulationResult {
            total_spikes: spike_ticks.len(),
            spike_ticks,
            trace,
            final_state: self.core.state(),
            final_params: *self.core.params(),
            ticks_executed: self.params.ticks,
        };
        log::log!(
            level,
            "Simulation completed: {} spikes in {} ticks",
            result.total_spikes,
            result.ticks_executed
        );
        Ok(result)
    }
}

/// Run `ticks` ticks at a constant stimulus without recording a trace.
///
/// Batch helper: progress is logged at debug level only.
pub fn run_fixed(ticks: u64, stimulus: u8, frame: Option<SerialFrame>) -> Result<SimulationResult> {
    let mut params = SimulationParams::new(ticks)?.with_trace(false);
    params.frame = frame;
    SimulationEngine::new(params)?
        .run_logged(&StimulusPattern::Constant(stimulus), log::Level::Debug)
}

/// One point of a stimulus/response sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponsePoint {
    /// Constant stimulus level
    pub stimulus: u8,
    /// Spikes in the run
    pub spikes: usize,
    /// Tick of the first spike
    pub first_spike: Option<u64>,
}

/// Spike counts for each constant stimulus level, in input order
pub fn response_curve(
    levels: &[u8],
    ticks: u64,
    frame: Option<SerialFrame>,
) -> Result<Vec<ResponsePoint>> {
    let point = |&stimulus: &u8| -> Result<ResponsePoint> {
        let result = run_fixed(ticks, stimulus, frame)?;
        Ok(ResponsePoint {
            stimulus,
            spikes: result.total_spikes,
            first_spike: result.first_spike(),
        })
    };

    log::info!(
        "Response curve: {} levels, {} ticks each",
        levels.len(),
        ticks
    );

    #[cfg(feature = "parallel")]
    let points = levels.par_iter().map(point).collect();
    #[cfg(not(feature = "parallel"))]
    let points = levels.iter().map(point).collect();

    points
}
