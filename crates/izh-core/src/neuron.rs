//! Neuron Integration Engine
//!
//! Evaluates the Izhikevich model
//!
//! ```text
//! dv/dt = 0.04v² + 5v + 140 - u + I
//! du/dt = a(bv - u)
//! if v >= 30 mV: v = c, u = u + d
//! ```
//!
//! with 16-bit state registers, 32-bit wrapping intermediates and arithmetic
//! shifts only. The 0.04 coefficient becomes `3 · (v² >> 10)`. The recovery term
//! pre-shifts `u` by 6 bits so `b · v` and `u` share a scale before the
//! difference is taken. Each tick applies `dv >> 7` to the membrane and
//! `du >> 6` to the recovery variable.

use crate::fixed_point::{asr, constants, Q9_6};
use crate::params::ParamSet;

/// Bit 7 of the output byte
pub const SPIKE_BIT: u8 = 0x80;
/// Bits 6:0 of the output byte
pub const POTENTIAL_MASK: u8 = 0x7F;
/// Potential reported at or above threshold
pub const POTENTIAL_CLAMP: u8 = POTENTIAL_MASK;

const V_SQ_PRESCALE: u32 = 10;
const V_SQ_COEFF: i32 = 3;
const V_LINEAR_COEFF: i32 = 5;
/// Euler step of 1/128 per tick for the membrane
const DV_POST_SHIFT: u32 = 7;
/// Shift pair that keeps `b·v - u` in range through the `a` product
const RECOVERY_PRECISION_SHIFT: u32 = 6;
const DU_POST_SHIFT: u32 = 6;

/// Per-tick engine outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineOutput {
    /// High for exactly the tick on which v is reset
    pub spike: bool,
    /// 7-bit membrane potential projection
    pub potential: u8,
}

impl EngineOutput {
    /// Outputs immediately after reset
    pub const RESET: Self = Self { spike: false, potential: 0 };

    /// Pack into the output byte (bit 7 spike, bits 6:0 potential)
    #[inline(always)]
    pub const fn to_byte(self) -> u8 {
        (if self.spike { SPIKE_BIT } else { 0 }) | (self.potential & POTENTIAL_MASK)
    }

    /// Unpack an output byte
    #[inline(always)]
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            spike: byte & SPIKE_BIT != 0,
            potential: byte & POTENTIAL_MASK,
        }
    }
}

/// Project v onto the 7-bit potential output.
///
/// `(v - V_REST) >> 6` maps [V_REST, V_THRESH) monotonically onto [0, 99]. Outside
/// that band the value is masked to 7 bits, so potentials below rest wrap
/// around to the top of the range. At or above threshold the output clamps to 127.
#[inline]
pub fn project_potential(v: Q9_6) -> u8 {
    if v >= constants::V_THRESH {
        return POTENTIAL_CLAMP;
    }
    let offset = v.widen().wrapping_sub(constants::V_REST.widen());
    (asr(offset, Q9_6::FRAC_BITS) as u8) & POTENTIAL_MASK
}

/// Membrane potential and recovery registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeuronState {
    /// Membrane potential (mV × 64)
    pub v: Q9_6,
    /// Recovery variable (same scale)
    pub u: Q9_6,
}

impl NeuronState {
    /// Register contents after reset
    pub const RESET: Self = Self {
        v: constants::V_REST,
        u: Q9_6::ZERO,
    };

    /// Create from explicit register values
    #[inline(always)]
    pub const fn new(v: Q9_6, u: Q9_6) -> Self {
        Self { v, u }
    }

    /// Spike test against the pre-update potential
    #[inline(always)]
    pub fn is_spiking(&self) -> bool {
        self.v >= constants::V_THRESH
    }

    /// One active tick: returns the next registers and this tick's outputs.
    ///
    /// Reads only `self`, so every term sees pre-tick values.
    pub fn step(self, params: &ParamSet, stimulus: u8) -> (Self, EngineOutput) {
        if self.is_spiking() {
            let output = EngineOutput {
                spike: true,
                potential: POTENTIAL_CLAMP,
            };
            return (self.fire(params), output);
        }

        let output = EngineOutput {
            spike: false,
            potential: project_potential(self.v),
        };
        (self.integrate(params, stimulus), output)
    }

    /// Spike branch: `v = c`, `u = u + d`
    #[inline]
    pub fn fire(self, params: &ParamSet) -> Self {
        Self {
            v: params.c,
            u: self.u + params.d,
        }
    }

    /// Integration branch (one forward-Euler step in fixed point)
    pub fn integrate(self, params: &ParamSet, stimulus: u8) -> Self {
        let v = self.v.widen();
        let u = self.u.widen();

        let v_sq = asr(v.wrapping_mul(v), V_SQ_PRESCALE);
        let dv = V_SQ_COEFF
            .wrapping_mul(v_sq)
            .wrapping_add(V_LINEAR_COEFF.wrapping_mul(v))
            .wrapping_add(constants::RESTING_DRIVE)
            .wrapping_sub(u)
            .wrapping_add(i32::from(stimulus) * Q9_6::SCALE);

        let drive = params
            .b
            .widen()
            .wrapping_mul(v)
            .wrapping_sub(u.wrapping_shl(RECOVERY_PRECISION_SHIFT));
        let du = asr(
            params
                .a
                .widen()
                .wrapping_mul(asr(drive, RECOVERY_PRECISION_SHIFT)),
            RECOVERY_PRECISION_SHIFT,
        );

        Self {
            v: Q9_6::from_wide(v.wrapping_add(asr(dv, DV_POST_SHIFT))),
            u: Q9_6::from_wide(u.wrapping_add(asr(du, DU_POST_SHIFT))),
        }
    }
}

impl Default for NeuronState {
    fn default() -> Self {
        Self::RESET
    }
}

/// Integration engine with its output registers and gating.
///
/// While disabled or while parameters are not ready the registers hold, the
/// potential output freezes and the spike bit drops to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegrationEngine {
    state: NeuronState,
    output: EngineOutput,
}

impl IntegrationEngine {
    /// Create an engine in its reset state
    pub const fn new() -> Self {
        Self {
            state: NeuronState::RESET,
            output: EngineOutput::RESET,
        }
    }

    /// Synchronous reset
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance one tick
    pub fn tick(
        &mut self,
        enable: bool,
        params_ready: bool,
        params: &ParamSet,
        stimulus: u8,
    ) -> EngineOutput {
        if enable && params_ready {
            let (next, output) = self.state.step(params, stimulus);
            if output.spike {
                log::trace!(
                    "spike: v {} -> {}, u {} -> {}",
                    self.state.v,
                    next.v,
                    self.state.u,
                    next.u
                );
            }
            self.state = next;
            self.output = output;
        } else {
            self.output.spike = false;
        }
        self.output
    }

    /// Current registers
    #[inline(always)]
    pub fn state(&self) -> NeuronState {
        self.state
    }

    /// Outputs latched on the last tick
    #[inline(always)]
    pub fn output(&self) -> EngineOutput {
        self.output
    }
}
