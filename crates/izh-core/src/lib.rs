//! # izh-core: Bit-Exact Fixed-Point Izhikevich Neuron
//!
//! A digital model of one Izhikevich neuron sized for an 8-bit I/O budget: an
//! 8-bit stimulus sample goes in every tick, a 4-parameter configuration arrives
//! over a 1-bit serial line, and every tick produces a spike flag plus a 7-bit
//! membrane potential reading.
//!
//! ## Design Principles
//!
//! - **Integer Only**: 16-bit registers, 32-bit intermediates, arithmetic shifts
//! - **Bit-Exact**: truncation and floor rounding are part of the contract
//! - **Pure Transitions**: each component exposes `step(self, ..) -> Self`
//! - **Zero Heap Allocation**: every register is a plain `Copy` value
//!
//! ## Quick Start
//!
//! ```rust
//! use izh_core::{NeuronCore, TickInputs};
//!
//! let mut core = NeuronCore::new();
//! core.tick(TickInputs::RESET);
//!
//! let spikes = (0..400)
//!     .map(|_| core.tick(TickInputs::run(0)))
//!     .filter(|out| out.spike())
//!     .count();
//! assert_eq!(spikes, 6);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod chip;
pub mod fixed_point;
pub mod loader;
pub mod neuron;
pub mod params;

// Re-export core types
pub use crate::{
    chip::{NeuronCore, TickInputs, TickOutputs},
    fixed_point::{asr, constants, FixedPoint, Q9_6},
    loader::{LoaderState, SerialLoader},
    neuron::{project_potential, EngineOutput, IntegrationEngine, NeuronState},
    params::{presets, ParamKind, ParamSet},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile-time layout checks for the register file
const _: () = {
    assert!(core::mem::size_of::<Q9_6>() == 2, "Q9.6 must be a 16-bit register");
    assert!(core::mem::size_of::<ParamSet>() == 8, "parameter set is four 16-bit registers");
    assert!(SerialLoader::FRAME_BITS == 32, "frame is exactly 32 bits");
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the neuron core

    pub use crate::{
        EngineOutput, LoaderState, NeuronCore, NeuronState, ParamKind, ParamSet, Q9_6,
        SerialLoader, TickInputs, TickOutputs,
    };
}
