//! Serial Parameter Loader
//!
//! Deserializes a 32-bit frame (four bytes, MSB first) from a single data line into
//! a [`ParamSet`]. Framing uses only the load-enable line. A rising edge is
//! registered as a one-tick start pulse; the pulse arms LOAD_A on the next tick,
//! and every tick after that with the line held high shifts in one bit. A sender
//! therefore holds the line high for two ticks before the first data bit. Byte
//! boundaries are inferred by counting 8 bits per parameter.
//!
//! ```text
//!   IDLE --start--> LOAD_A --8 bits--> LOAD_B --8 bits--> LOAD_C
//!   LOAD_C --8 bits--> LOAD_D --8 bits--> READY
//!   LOAD_* --line low--> IDLE
//!   READY --line low--> IDLE
//!   READY --start--> LOAD_A
//! ```
//!
//! Bytes are staged while a frame is in flight and the committed set is replaced
//! wholesale when LOAD_D completes. A frame abandoned mid-way is discarded silently.

use crate::params::{ParamKind, ParamSet};

/// Loader FSM state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoaderState {
    /// Waiting for a rising edge on load-enable
    Idle,
    /// Shifting in the byte for `a`
    LoadA,
    /// Shifting in the byte for `b`
    LoadB,
    /// Shifting in the byte for `c`
    LoadC,
    /// Shifting in the byte for `d`
    LoadD,
    /// Frame committed (or defaults after reset)
    Ready,
}

impl LoaderState {
    /// 3-bit state code exposed for debugging
    pub const fn debug_code(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::LoadA => 1,
            Self::LoadB => 2,
            Self::LoadC => 3,
            Self::LoadD => 4,
            Self::Ready => 5,
        }
    }

    /// Inverse of [`debug_code`](Self::debug_code)
    pub const fn from_debug_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Idle),
            1 => Some(Self::LoadA),
            2 => Some(Self::LoadB),
            3 => Some(Self::LoadC),
            4 => Some(Self::LoadD),
            5 => Some(Self::Ready),
            _ => None,
        }
    }

    /// Parameter slot being shifted in, if any
    pub const fn slot(self) -> Option<ParamKind> {
        match self {
            Self::LoadA => Some(ParamKind::A),
            Self::LoadB => Some(ParamKind::B),
            Self::LoadC => Some(ParamKind::C),
            Self::LoadD => Some(ParamKind::D),
            Self::Idle | Self::Ready => None,
        }
    }

    /// True in any LOAD_* state
    #[inline(always)]
    pub const fn is_loading(self) -> bool {
        self.slot().is_some()
    }

    /// State entered once the current byte completes
    const fn after_byte(self) -> Self {
        match self {
            Self::LoadA => Self::LoadB,
            Self::LoadB => Self::LoadC,
            Self::LoadC => Self::LoadD,
            Self::LoadD => Self::Ready,
            other => other,
        }
    }

    /// Next state for the given start/level/byte-complete conditions.
    ///
    /// `start` is the registered edge pulse (a 0→1 transition of load-enable seen
    /// on the previous tick), `load_enable` the current level, `byte_done` whether
    /// this tick shifted the eighth bit of the current byte.
    pub const fn transition(self, start: bool, load_enable: bool, byte_done: bool) -> Self {
        match self {
            Self::Idle | Self::Ready if start => Self::LoadA,
            Self::Ready if !load_enable => Self::Idle,
            Self::Idle | Self::Ready => self,
            _ if !load_enable => Self::Idle,
            _ if byte_done => self.after_byte(),
            _ => self,
        }
    }
}

/// Bit-serial parameter loader registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialLoader {
    state: LoaderState,
    prev_load_enable: bool,
    load_start: bool,
    shift_reg: u8,
    bit_count: u8,
    staged: ParamSet,
    committed: ParamSet,
}

impl SerialLoader {
    /// Bits per parameter byte
    pub const BITS_PER_PARAM: u8 = 8;
    /// Bits per complete frame
    pub const FRAME_BITS: u8 = Self::BITS_PER_PARAM * ParamKind::ALL.len() as u8;

    /// Loader in its reset state: READY with the default preset committed
    pub const fn new() -> Self {
        Self {
            state: LoaderState::Ready,
            prev_load_enable: false,
            load_start: false,
            shift_reg: 0,
            bit_count: 0,
            staged: ParamSet::REGULAR_SPIKING,
            committed: ParamSet::REGULAR_SPIKING,
        }
    }

    /// Synchronous reset
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pure transition: the loader registers after one tick
    pub fn step(self, load_enable: bool, serial_data: bool) -> Self {
        let start = self.load_start;
        let mut next = self;
        next.prev_load_enable = load_enable;
        next.load_start = load_enable && !self.prev_load_enable;

        let mut byte_done = false;
        match self.state.slot() {
            None if start => {
                next.shift_reg = 0;
                next.bit_count = 0;
                next.staged = self.committed;
            }
            Some(kind) if load_enable => {
                next.shift_reg = (self.shift_reg << 1) | u8::from(serial_data);
                next.bit_count = self.bit_count + 1;
                log::trace!(
                    "loader {:?}: bit {} = {}",
                    self.state,
                    self.bit_count,
                    u8::from(serial_data)
                );

                if next.bit_count == Self::BITS_PER_PARAM {
                    byte_done = true;
                    next.staged = self.staged.with(kind, kind.decode(next.shift_reg));
                    log::debug!(
                        "loader byte {}=0x{:02X} -> {}",
                        kind.name(),
                        next.shift_reg,
                        next.staged.get(kind)
                    );
                    next.shift_reg = 0;
                    next.bit_count = 0;
                }
            }
            Some(_) => {
                log::debug!(
                    "loader frame abandoned in {:?} after {} bits",
                    self.state,
                    self.bit_count
                );
                next.shift_reg = 0;
                next.bit_count = 0;
                next.staged = self.committed;
            }
            None => {}
        }

        next.state = self.state.transition(start, load_enable, byte_done);
        if self.state == LoaderState::LoadD && next.state == LoaderState::Ready {
            next.committed = next.staged;
            log::debug!("loader committed {:?}", next.committed);
        }
        if next.state != self.state {
            log::debug!("loader {:?} -> {:?}", self.state, next.state);
        }
        next
    }

    /// Advance one tick in place
    #[inline]
    pub fn tick(&mut self, load_enable: bool, serial_data: bool) {
        *self = self.step(load_enable, serial_data);
    }

    /// Committed parameter set
    #[inline(always)]
    pub fn params(&self) -> &ParamSet {
        &self.committed
    }

    /// Committed parameters are valid: false throughout any LOAD_* state
    #[inline(always)]
    pub fn params_ready(&self) -> bool {
        !self.state.is_loading()
    }

    /// Current FSM state
    #[inline(always)]
    pub fn state(&self) -> LoaderState {
        self.state
    }

    /// Start pulse registered from a rising edge on the last tick
    #[inline(always)]
    pub fn start_pending(&self) -> bool {
        self.load_start
    }

    /// Bits collected toward the current byte
    #[inline(always)]
    pub fn pending_bits(&self) -> u8 {
        self.bit_count
    }
}

impl Default for SerialLoader {
    fn default() -> Self {
        Self::new()
    }
}
