//! Tick-level composition of the integration engine and the serial loader

use crate::fixed_point::Q9_6;
use crate::loader::{LoaderState, SerialLoader};
use crate::neuron::{EngineOutput, IntegrationEngine, NeuronState};
use crate::params::ParamSet;

/// Signals sampled on one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickInputs {
    /// Synchronous reset, overrides every other input
    pub reset: bool,
    /// Gates all state mutation
    pub enable: bool,
    /// Unsigned stimulus sample (mV of injected current)
    pub stimulus: u8,
    /// Serial parameter data line
    pub serial_data: bool,
    /// Serial load-enable / framing line
    pub load_enable: bool,
}

impl TickInputs {
    /// Reset asserted, everything else low
    pub const RESET: Self = Self {
        reset: true,
        enable: false,
        stimulus: 0,
        serial_data: false,
        load_enable: false,
    };

    /// Enabled tick with the given stimulus and the serial lines idle
    pub const fn run(stimulus: u8) -> Self {
        Self {
            reset: false,
            enable: true,
            stimulus,
            serial_data: false,
            load_enable: false,
        }
    }

    /// Enabled tick driving the serial lines
    pub const fn serial(stimulus: u8, load_enable: bool, serial_data: bool) -> Self {
        Self {
            reset: false,
            enable: true,
            stimulus,
            serial_data,
            load_enable,
        }
    }
}

/// Registered outputs after one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickOutputs {
    /// Bit 7 spike, bits 6:0 quantized potential
    pub output: u8,
    /// Committed parameters are valid
    pub params_ready: bool,
    /// 3-bit loader state code
    pub loader_state: u8,
}

impl TickOutputs {
    /// Spike bit of the output byte
    #[inline(always)]
    pub const fn spike(&self) -> bool {
        EngineOutput::from_byte(self.output).spike
    }

    /// Potential field of the output byte
    #[inline(always)]
    pub const fn potential(&self) -> u8 {
        EngineOutput::from_byte(self.output).potential
    }
}

/// One neuron: integration engine plus serial parameter loader in a single
/// synchronous clock domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeuronCore {
    engine: IntegrationEngine,
    loader: SerialLoader,
}

impl NeuronCore {
    /// Core in its reset state
    pub const fn new() -> Self {
        Self {
            engine: IntegrationEngine::new(),
            loader: SerialLoader::new(),
        }
    }

    /// Advance one clock tick.
    ///
    /// The engine consumes the parameter set and readiness flag the loader held
    /// before this tick; both components then update together.
    pub fn tick(&mut self, inputs: TickInputs) -> TickOutputs {
        if inputs.reset {
            self.engine.reset();
            self.loader.reset();
            return self.outputs();
        }
        if !inputs.enable {
            self.engine.tick(false, false, self.loader.params(), inputs.stimulus);
            return self.outputs();
        }

        let params = *self.loader.params();
        let params_ready = self.loader.params_ready();
        self.engine.tick(true, params_ready, &params, inputs.stimulus);
        self.loader.tick(inputs.load_enable, inputs.serial_data);
        self.outputs()
    }

    /// Current registered outputs
    pub fn outputs(&self) -> TickOutputs {
        TickOutputs {
            output: self.engine.output().to_byte(),
            params_ready: self.loader.params_ready(),
            loader_state: self.loader.state().debug_code(),
        }
    }

    /// Membrane potential register
    #[inline(always)]
    pub fn v(&self) -> Q9_6 {
        self.engine.state().v
    }

    /// Recovery register
    #[inline(always)]
    pub fn u(&self) -> Q9_6 {
        self.engine.state().u
    }

    /// Both state registers
    #[inline(always)]
    pub fn state(&self) -> NeuronState {
        self.engine.state()
    }

    /// Committed parameter set
    #[inline(always)]
    pub fn params(&self) -> &ParamSet {
        self.loader.params()
    }

    /// Loader FSM state
    #[inline(always)]
    pub fn loader_state(&self) -> LoaderState {
        self.loader.state()
    }

    /// Engine outputs latched on the last tick
    #[inline(always)]
    pub fn last_output(&self) -> EngineOutput {
        self.engine.output()
    }
}
