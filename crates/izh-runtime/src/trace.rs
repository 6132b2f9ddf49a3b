//! Per-tick register traces and golden-trace comparison

use std::fmt;

use izh_core::{NeuronCore, TickOutputs};

use crate::error::{Result, RuntimeError};

/// Registers observed after one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceSample {
    /// Tick index within the run (0-based)
    pub tick: u64,
    /// Raw Q9.6 membrane potential
    pub v: i16,
    /// Raw Q9.6 recovery variable
    pub u: i16,
    /// Spike bit of the output byte
    pub spike: bool,
    /// 7-bit potential field of the output byte
    pub potential: u8,
    /// Loader readiness flag
    pub params_ready: bool,
}

impl TraceSample {
    /// Capture the core's registers together with the outputs of the same tick
    pub fn capture(tick: u64, core: &NeuronCore, outputs: &TickOutputs) -> Self {
        Self {
            tick,
            v: core.v().to_raw(),
            u: core.u().to_raw(),
            spike: outputs.spike(),
            potential: outputs.potential(),
            params_ready: outputs.params_ready,
        }
    }

    /// Membrane potential in millivolts
    pub fn v_millivolts(&self) -> f32 {
        f32::from(self.v) / 64.0
    }
}

/// Ordered sequence of samples
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace {
    samples: Vec<TraceSample>,
}

impl Trace {
    /// Empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty trace with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample
    pub fn record(&mut self, sample: TraceSample) {
        self.samples.push(sample);
    }

    /// Recorded samples in tick order
    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Ticks whose sample carries a spike
    pub fn spike_ticks(&self) -> Vec<u64> {
        self.samples
            .iter()
            .filter(|s| s.spike)
            .map(|s| s.tick)
            .collect()
    }

    /// Check this trace against a reference, reporting the first difference.
    ///
    /// Fields are compared in the order v, u, spike, potential, params_ready.
    pub fn compare(&self, golden: &Trace) -> Result<()> {
        if self.len() != golden.len() {
            return Err(RuntimeError::TraceLengthMismatch {
                expected: golden.len(),
                actual: self.len(),
            });
        }

        for (actual, expected) in self.samples.iter().zip(&golden.samples) {
            let fields: [(&'static str, i32, i32); 5] = [
                ("v", expected.v.into(), actual.v.into()),
                ("u", expected.u.into(), actual.u.into()),
                ("spike", expected.spike.into(), actual.spike.into()),
                ("potential", expected.potential.into(), actual.potential.into()),
                (
                    "params_ready",
                    expected.params_ready.into(),
                    actual.params_ready.into(),
                ),
            ];
            if let Some(&(field, expected_value, actual_value)) =
                fields.iter().find(|(_, e, a)| e != a)
            {
                return Err(RuntimeError::TraceMismatch {
                    tick: expected.tick,
                    field,
                    expected: expected_value,
                    actual: actual_value,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<TraceSample> for Trace {
    fn from_iter<I: IntoIterator<Item = TraceSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceSample;
    type IntoIter = std::slice::Iter<'a, TraceSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} {:>7} {:>7} {:>9} {:>5} {:>5}",
            "tick", "v", "u", "v_mV", "spike", "pot"
        )?;
        for s in &self.samples {
            writeln!(
                f,
                "{:>8} {:>7} {:>7} {:>9.3} {:>5} {:>5}",
                s.tick,
                s.v,
                s.u,
                s.v_millivolts(),
                u8::from(s.spike),
                s.potential
            )?;
        }
        Ok(())
    }
}
