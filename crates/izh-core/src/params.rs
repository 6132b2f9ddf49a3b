//! Izhikevich parameter set and the per-byte scaling used by the serial loader

use crate::fixed_point::Q9_6;

/// Slot of the parameter set a serial byte is loaded into.
///
/// Slots load in declaration order: a, b, c, d.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKind {
    /// Recovery time scale
    A,
    /// Recovery sensitivity to v
    B,
    /// After-spike reset value of v
    C,
    /// After-spike increment of u
    D,
}

impl ParamKind {
    /// All slots in frame order
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Position of this slot within a 4-byte frame
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rescale a freshly shifted-in byte into this slot's Q9.6 value
    pub const fn decode(self, byte: u8) -> Q9_6 {
        match self {
            Self::A => decode_a(byte),
            Self::B => decode_b(byte),
            Self::C => decode_c(byte),
            Self::D => decode_d(byte),
        }
    }

    /// Lowercase parameter name
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }
}

/// `a = (B >> 4) + 1`, range [1, 16]
#[inline]
pub const fn decode_a(byte: u8) -> Q9_6 {
    Q9_6::from_raw((byte >> 4) as i16 + 1)
}

/// `b` is offset-binary around 128: bytes above 127 map to `(B - 128) >> 2`,
/// the rest to `-((128 - B) >> 2)`. Range [-32, 31].
#[inline]
pub const fn decode_b(byte: u8) -> Q9_6 {
    let raw = if byte > 127 {
        ((byte - 128) >> 2) as i16
    } else {
        -((128 - byte as i16) >> 2)
    };
    Q9_6::from_raw(raw)
}

/// `c = -((B >> 2) + 40)` mV, always negative: [-103, -40] mV
#[inline]
pub const fn decode_c(byte: u8) -> Q9_6 {
    Q9_6::from_int(-((byte >> 2) as i16 + 40))
}

/// `d = (B >> 4)` mV, non-negative: [0, 15] mV
#[inline]
pub const fn decode_d(byte: u8) -> Q9_6 {
    Q9_6::from_int((byte >> 4) as i16)
}

/// The four Izhikevich parameters in the shared Q9.6 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamSet {
    /// Recovery time scale
    pub a: Q9_6,
    /// Recovery sensitivity to v
    pub b: Q9_6,
    /// After-spike reset value of v
    pub c: Q9_6,
    /// After-spike increment of u
    pub d: Q9_6,
}

impl ParamSet {
    /// Regular-spiking preset committed on reset
    pub const REGULAR_SPIKING: Self = Self {
        a: Q9_6::from_raw(1),
        b: Q9_6::from_raw(13),
        c: Q9_6::from_int(-65),
        d: Q9_6::from_int(2),
    };

    /// Decode a complete 4-byte frame (a, b, c, d order)
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            a: decode_a(bytes[0]),
            b: decode_b(bytes[1]),
            c: decode_c(bytes[2]),
            d: decode_d(bytes[3]),
        }
    }

    /// Read one slot
    #[inline]
    pub const fn get(&self, kind: ParamKind) -> Q9_6 {
        match kind {
            ParamKind::A => self.a,
            ParamKind::B => self.b,
            ParamKind::C => self.c,
            ParamKind::D => self.d,
        }
    }

    /// Copy with one slot replaced
    #[inline]
    pub const fn with(mut self, kind: ParamKind, value: Q9_6) -> Self {
        match kind {
            ParamKind::A => self.a = value,
            ParamKind::B => self.b = value,
            ParamKind::C => self.c = value,
            ParamKind::D => self.d = value,
        }
        self
    }
}

impl Default for ParamSet {
    fn default() -> Self {
        Self::REGULAR_SPIKING
    }
}

/// Raw 4-byte frames for common neuron classes.
pub mod presets {
    /// Regular spiking
    pub const REGULAR_SPIKING: [u8; 4] = [0x05, 0x33, 0x41, 0x08];
    /// Fast spiking (faster recovery through a larger `a`)
    pub const FAST_SPIKING: [u8; 4] = [0x19, 0x33, 0x41, 0x08];
}
