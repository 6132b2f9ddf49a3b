//! Transmit side of the serial parameter protocol
//!
//! A frame is four bytes (a, b, c, d) sent MSB-first, one bit per tick, while
//! load-enable is held high. The line rises two ticks before the first data
//! bit: the receiver registers the edge on the first preamble tick and arms on
//! the second. A release tick follows the 32 data ticks.

use std::fmt;
use std::str::FromStr;

use izh_core::{NeuronCore, ParamSet, SerialLoader, TickInputs, TickOutputs};

use crate::error::{Result, RuntimeError};

/// Load-enable ticks sent ahead of the first data bit
pub const PREAMBLE_TICKS: usize = 2;

/// Four raw parameter bytes in transmission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialFrame {
    bytes: [u8; 4],
}

impl SerialFrame {
    /// Ticks needed to deliver one frame: 2 preamble + 32 data + release
    pub const TICKS: usize = SerialLoader::FRAME_BITS as usize + PREAMBLE_TICKS + 1;

    /// Frame carrying the given bytes
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self { bytes }
    }

    /// Raw bytes
    pub const fn bytes(&self) -> [u8; 4] {
        self.bytes
    }

    /// Parameters the loader commits for this frame
    pub const fn params(&self) -> ParamSet {
        ParamSet::from_bytes(self.bytes)
    }

    /// The 32 data bits, MSB of byte a first
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bytes
            .iter()
            .flat_map(|&byte| (0..8u32).rev().map(move |bit| (byte >> bit) & 1 == 1))
    }

    /// Tick inputs that deliver the whole frame, then release the line
    pub fn drive(&self, stimulus: u8) -> Vec<TickInputs> {
        self.drive_bits(SerialLoader::FRAME_BITS as usize, stimulus)
    }

    /// Tick inputs for a frame cut short after `bits` data bits.
    ///
    /// The loader discards the partial frame when the line drops.
    pub fn truncated(&self, bits: usize, stimulus: u8) -> Vec<TickInputs> {
        self.drive_bits(bits.min(SerialLoader::FRAME_BITS as usize), stimulus)
    }

    fn drive_bits(&self, bits: usize, stimulus: u8) -> Vec<TickInputs> {
        let mut ticks = Vec::with_capacity(bits + PREAMBLE_TICKS + 1);
        ticks.extend((0..PREAMBLE_TICKS).map(|_| TickInputs::serial(stimulus, true, false)));
        ticks.extend(
            self.bits()
                .take(bits)
                .map(|bit| TickInputs::serial(stimulus, true, bit)),
        );
        ticks.push(TickInputs::serial(stimulus, false, false));
        ticks
    }

    /// Clock the frame into a core and return the outputs of the release tick
    pub fn load(&self, core: &mut NeuronCore, stimulus: u8) -> TickOutputs {
        let mut last = core.outputs();
        for inputs in self.drive(stimulus) {
            last = core.tick(inputs);
        }
        log::debug!("frame {} loaded: {:?}", self, core.params());
        last
    }
}

impl From<[u8; 4]> for SerialFrame {
    fn from(bytes: [u8; 4]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Display for SerialFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.bytes;
        write!(f, "{:02X}{:02X}{:02X}{:02X}", a, b, c, d)
    }
}

impl FromStr for SerialFrame {
    type Err = RuntimeError;

    /// Parse 8 hex digits, optionally `0x`-prefixed and grouped with `:`, `_`, `-`
    /// or spaces (`05334108`, `0x05334108`, `05:33:41:08`).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let digits: String = body
            .chars()
            .filter(|&c| !matches!(c, ':' | '_' | '-' | ' '))
            .collect();

        if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RuntimeError::invalid_frame(s, "expected 8 hex digits"));
        }
        let word = u32::from_str_radix(&digits, 16)
            .map_err(|e| RuntimeError::invalid_frame(s, e.to_string()))?;
        Ok(Self::new(word.to_be_bytes()))
    }
}
