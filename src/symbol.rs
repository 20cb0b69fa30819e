//! Module: symbol
//!
//! Purpose: Pulse symbol classes, the precomputed timing table, and the
//! electrical line-level convention for the shutter protocol.
//!
//! Architecture:
//! - Fixed-size table indexed by a small repr(u8) enum, constant lookup cost
//! - Durations built by pure multiplication (targets without hardware
//!   division distort signal timing badly when forced to divide)
//! - Logical bit value and electrical level are inverted relative to each
//!   other; idle is electrically HIGH
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// Calibration constant: approximate microseconds per tick-factor unit,
/// empirically tuned to the transmitter's required pulse width.
pub const DELAY_FACTOR_US: u32 = 114;

/// Smallest interval between two signal changes, in tick-factor units.
pub const TICK_FACTOR: u32 = 10;

/// Sequence separator, in tick-factor units.
pub const SEP_FACTOR: u32 = 48;

/// Long settle delay before transmission, in tick-factor units.
pub const LONG_FACTOR: u32 = 500;

/// Pulse duration class.
///
/// The protocol only ever holds the line for one of four durations.
/// Values double as indices into [`TimingTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PulseClass {
    /// Instantaneous (no hold). Used by the frame trail to flip the line
    /// without delay.
    Zero = 0,
    /// One base tick.
    Tick = 1,
    /// Inter-sequence separator.
    Sep = 2,
    /// Long pre-transmission settle.
    Long = 3,
}

/// Precomputed pulse durations, one per [`PulseClass`].
///
/// Built once at encoder construction and immutable thereafter. All values
/// are integer multiples of [`DELAY_FACTOR_US`], computed with
/// multiplication only.
#[derive(Clone, Copy, Debug)]
pub struct TimingTable {
    durations_us: [u32; 4],
}

impl TimingTable {
    /// Build the table from the fixed calibration constant.
    pub const fn new() -> Self {
        Self {
            durations_us: [
                0,
                TICK_FACTOR * DELAY_FACTOR_US,
                SEP_FACTOR * DELAY_FACTOR_US,
                LONG_FACTOR * DELAY_FACTOR_US,
            ],
        }
    }

    /// Duration for a pulse class, in microseconds (pre-shift).
    #[inline]
    pub const fn duration_us(&self, class: PulseClass) -> u32 {
        self.durations_us[class as usize]
    }
}

impl Default for TimingTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Electrical level of the transmitter data line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineLevel {
    High,
    Low,
}

impl LineLevel {
    /// Rest state of the line: transmitter inactive.
    pub const IDLE: Self = LineLevel::High;

    /// Map a logical bit to its electrical level.
    ///
    /// The convention is inverted: logical 1 drives the line LOW (active),
    /// logical 0 drives it HIGH (idle).
    #[inline]
    pub const fn from_logical(bit: bool) -> Self {
        if bit {
            LineLevel::Low
        } else {
            LineLevel::High
        }
    }

    /// Check whether this level is the rest state.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        matches!(self, LineLevel::High)
    }
}
