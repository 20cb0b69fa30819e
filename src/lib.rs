//! # rf433-shutter
//!
//! Pulse encoder for 433MHz OOK shutter remotes. Converts a 32-bit command
//! into the timed pulse train the receivers expect and drives it onto a
//! transmitter data line through a narrow platform contract.
//!
//! ## Architecture
//!
//! - [`PulseEncoder`] is pure logic: frame serialization, timing table,
//!   chunked division-free delays. Fully testable on host.
//! - [`RfPlatform`] is the only hardware seam: configure the line, drive a
//!   level, busy-delay. One implementation per target.
//! - Transmission is a single blocking call; no async, no cancellation,
//!   no error states. The line is left idle on every exit path.

#![cfg_attr(not(test), no_std)]

pub mod encoder;
pub mod logging;
pub mod platform;
pub mod symbol;

pub use encoder::{PulseEncoder, DEFAULT_REPEAT};
pub use logging::{LogLevel, TxLog};
pub use platform::{RfPlatform, DELAY_CHUNK_US, TIMER_SHIFT};
pub use symbol::{LineLevel, PulseClass, TimingTable};
