//! Module: platform
//!
//! Purpose: Contract between the encoder and the hardware it drives, plus
//! the division-free delay chunking shared by all implementations.
//!
//! Architecture:
//! - The encoder is pure logic; everything that touches a pin or a clock
//!   goes through [`RfPlatform`]
//! - Underlying delay primitives have a bounded argument width, so long
//!   holds are split into fixed-size chunks by repeated subtraction
//! - Clock prescaler compensation is a compile-time shift constant, never
//!   computed at runtime
//!
//! Safety: Safe. No unsafe blocks.

use crate::symbol::LineLevel;

/// Maximum duration handed to a single underlying delay call.
///
/// Imposed by the argument-width limit of the busy-delay primitives on the
/// smallest supported targets.
pub const DELAY_CHUNK_US: u32 = 10_000;

/// Compile-time right-shift compensating the clock prescaler on constrained
/// clock configurations. Zero on standard platforms.
#[cfg(feature = "clock-16mhz")]
pub const TIMER_SHIFT: u32 = 4;

#[cfg(all(feature = "clock-8mhz", not(feature = "clock-16mhz")))]
pub const TIMER_SHIFT: u32 = 3;

#[cfg(not(any(feature = "clock-8mhz", feature = "clock-16mhz")))]
pub const TIMER_SHIFT: u32 = 0;

/// Platform services required to drive one transmitter data line.
///
/// One implementation instance per physical line; the encoder owns it
/// exclusively. All delays are fully blocking.
pub trait RfPlatform {
    /// Configure the line as a digital output. Idempotent.
    fn configure_output(&mut self);

    /// Immediately drive the line to the given electrical level.
    fn set_level(&mut self, level: LineLevel);

    /// Busy-block for approximately `us` microseconds.
    /// `us` never exceeds [`DELAY_CHUNK_US`].
    fn delay_us(&mut self, us: u32);

    /// Busy-block for approximately `ms` milliseconds.
    /// `ms` never exceeds [`DELAY_CHUNK_US`].
    fn delay_ms(&mut self, ms: u32);
}

/// Walk a duration as fixed-size chunks plus one final partial chunk.
///
/// Applies `shift` first, then peels off [`DELAY_CHUNK_US`]-sized chunks
/// using only subtraction and comparison. The final partial chunk is always
/// emitted, even when zero, so the number of underlying delay calls per
/// pulse class is deterministic.
#[inline]
pub fn for_each_delay_chunk(mut duration: u32, shift: u32, mut emit: impl FnMut(u32)) {
    duration >>= shift;

    while duration >= DELAY_CHUNK_US {
        duration -= DELAY_CHUNK_US;
        emit(DELAY_CHUNK_US);
    }
    emit(duration);
}
