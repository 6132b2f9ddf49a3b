//! Fixed-point arithmetic for bit-exact neuron integration
//!
//! Every scaled quantity in the core (membrane potential, recovery variable and the
//! four model parameters) is a signed 16-bit register holding millivolts × 64.
//! Products are carried in 32-bit intermediates and only truncated back to 16 bits
//! when a register is assigned. Right shifts are arithmetic, so division by a power
//! of two rounds toward negative infinity exactly as a two's-complement shifter does.

use core::{fmt, ops};

/// Q9.6 fixed-point number (9 integer bits, 6 fractional bits, 1 sign bit)
///
/// Range: [-512.0, 511.984] mV with 1/64 mV resolution.
/// Covers the membrane range of interest (-70 mV to +30 mV) and every
/// parameter the serial loader can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Q9_6(i16);

impl Q9_6 {
    /// Number of fractional bits
    pub const FRAC_BITS: u32 = 6;
    /// Scale factor (2^6 = 64)
    pub const SCALE: i32 = 1 << Self::FRAC_BITS;
    /// Maximum representable value
    pub const MAX: Self = Self(i16::MAX);
    /// Minimum representable value
    pub const MIN: Self = Self(i16::MIN);
    /// Zero value
    pub const ZERO: Self = Self(0);

    /// Create from raw register contents
    #[inline(always)]
    pub const fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    /// Get raw register contents
    #[inline(always)]
    pub const fn to_raw(self) -> i16 {
        self.0
    }

    /// Create from whole millivolts (wraps like the 16-bit register it models)
    #[inline(always)]
    pub const fn from_int(millivolts: i16) -> Self {
        Self(millivolts.wrapping_mul(Self::SCALE as i16))
    }

    /// Truncate a 32-bit intermediate to the low 16 bits.
    ///
    /// This is the only narrowing point in the datapath; the precision loss is
    /// deliberate and must not saturate.
    #[inline(always)]
    pub const fn from_wide(wide: i32) -> Self {
        Self(wide as i16)
    }

    /// Sign-extend into a 32-bit intermediate
    #[inline(always)]
    pub const fn widen(self) -> i32 {
        self.0 as i32
    }

    /// Whole millivolts, rounded toward negative infinity
    #[inline(always)]
    pub const fn to_int(self) -> i16 {
        self.0 >> Self::FRAC_BITS
    }

    /// Convert to float (display and reporting only)
    #[inline]
    pub fn to_millivolts(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    /// Two's-complement addition at register width
    #[inline(always)]
    pub const fn wrapping_add(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }

    /// Two's-complement subtraction at register width
    #[inline(always)]
    pub const fn wrapping_sub(self, other: Self) -> Self {
        Self(self.0.wrapping_sub(other.0))
    }

    /// Arithmetic shift right (floor division by a power of two)
    #[inline(always)]
    pub const fn shr(self, bits: u32) -> Self {
        if bits >= 15 {
            if self.0 < 0 { Self(-1) } else { Self::ZERO }
        } else {
            Self(self.0 >> bits)
        }
    }
}

/// Arithmetic shift right of a 32-bit intermediate.
///
/// Rounds toward negative infinity: `asr(-1, 6) == -1`, never 0.
#[inline(always)]
pub const fn asr(value: i32, bits: u32) -> i32 {
    if bits >= 31 {
        if value < 0 { -1 } else { 0 }
    } else {
        value >> bits
    }
}

impl fmt::Display for Q9_6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_millivolts())
    }
}

impl ops::Add for Q9_6 {
    type Output = Self;

    #[inline(always)]
    fn add(self, other: Self) -> Self {
        self.wrapping_add(other)
    }
}

impl ops::Sub for Q9_6 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        self.wrapping_sub(other)
    }
}

impl ops::Neg for Q9_6 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl ops::AddAssign for Q9_6 {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl ops::SubAssign for Q9_6 {
    #[inline(always)]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl From<Q9_6> for i32 {
    #[inline(always)]
    fn from(value: Q9_6) -> Self {
        value.widen()
    }
}

impl From<Q9_6> for f32 {
    #[inline]
    fn from(value: Q9_6) -> Self {
        value.to_millivolts()
    }
}

/// Type alias for easier use
pub type FixedPoint = Q9_6;

/// Model constants in the shared Q9.6 scale
pub mod constants {
    use super::Q9_6;

    /// Resting membrane potential (-70 mV)
    pub const V_REST: Q9_6 = Q9_6::from_int(-70);

    /// Spike threshold (+30 mV)
    pub const V_THRESH: Q9_6 = Q9_6::from_int(30);

    /// Constant drive term of dv/dt (140 mV/ms) in 32-bit scaled form
    pub const RESTING_DRIVE: i32 = 140 * Q9_6::SCALE;
}
