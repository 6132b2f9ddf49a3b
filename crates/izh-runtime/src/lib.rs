//! Simulation harness for the fixed-point Izhikevich neuron core
//!
//! This crate wraps [`izh_core::NeuronCore`] with the pieces needed to drive it
//! from software: serial frame generation, stimulus schedules, multi-tick runs
//! with optional register traces, and golden-trace comparison.

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export the core so downstream users need a single dependency
pub use izh_core;

// Core modules
pub mod error;
pub mod frame;
pub mod simulation;
pub mod trace;

// Re-export essential types
pub use error::{Result, RuntimeError};
pub use frame::{SerialFrame, PREAMBLE_TICKS};
pub use simulation::{
    response_curve, run_fixed, ResponsePoint, SimulationEngine, SimulationParams,
    SimulationResult, StimulusPattern, RESET_TICKS,
};
pub use trace::{Trace, TraceSample};

/// Runtime crate version for compatibility checking
pub const RUNTIME_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_integration() {
        let params = SimulationParams::default();
        assert!(params.ticks > 0);
        assert!(params.validate().is_ok());
        assert_eq!(StimulusPattern::default(), StimulusPattern::Constant(0));
        assert_eq!(SerialFrame::TICKS, 35);
    }
}
