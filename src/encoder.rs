//! Pulse encoder for the proprietary shutter protocol.
//!
//! Converts a 32-bit command into the fixed pulse train the receivers
//! expect: a preamble, the code repeated several times (the medium is lossy
//! and open-loop), a post-amble, and a forced return to the rest state.
//!
//! Pure logic over [`RfPlatform`], no hardware dependencies. Fully testable
//! on host.

use crate::platform::{for_each_delay_chunk, RfPlatform, TIMER_SHIFT};
use crate::symbol::{LineLevel, PulseClass, TimingTable};

/// Default number of frame repetitions per transmission.
pub const DEFAULT_REPEAT: u8 = 8;

/// Encoder for one transmitter data line.
///
/// Owns the line exclusively. A transmission is a single blocking call;
/// there is no abort mechanism for a pulse already begun, so there are no
/// suspension points and no cancellation.
///
/// # Example
///
/// ```ignore
/// let mut encoder = PulseEncoder::new(line);
/// encoder.send(0x40A2B5D1);                  // default repeat
/// encoder.transmit(0x40A2B5D1, 2);           // explicit repeat
/// ```
pub struct PulseEncoder<P: RfPlatform> {
    platform: P,
    table: TimingTable,
    initialized: bool,
}

impl<P: RfPlatform> PulseEncoder<P> {
    /// Create an encoder and put the line at rest.
    ///
    /// The lazy-init flag stays unset so the first transmission re-asserts
    /// the line as output; external interference between construction and
    /// first use cannot leave it misconfigured.
    pub fn new(platform: P) -> Self {
        let mut encoder = Self {
            platform,
            table: TimingTable::new(),
            initialized: false,
        };
        encoder.init();
        encoder
    }

    /// (Re)configure the line as output and force it idle.
    ///
    /// Idempotent; produces no pulse.
    pub fn init(&mut self) {
        self.platform.configure_output();
        self.platform.set_level(LineLevel::IDLE);
    }

    /// Transmit `code` with the default repeat count.
    pub fn send(&mut self, code: u32) {
        self.transmit(code, DEFAULT_REPEAT);
    }

    /// Transmit a 32-bit command, repeating the frame `repeat` times.
    ///
    /// Blocks for the full transmission (tens of milliseconds, scaling with
    /// `repeat`). Any bit pattern is accepted; `repeat == 0` degenerates to
    /// preamble and post-amble only. The line is left idle on return.
    pub fn transmit(&mut self, code: u32, repeat: u8) {
        if !self.initialized {
            self.init();
            self.initialized = true;
        }

        // Preamble
        self.send_signal(true, PulseClass::Long);
        self.send_signal(false, PulseClass::Tick);
        self.send_signal(true, PulseClass::Sep);

        for _ in 0..repeat {
            self.send_frame(code);
        }

        // Post-amble
        self.send_signal(false, PulseClass::Tick);
        self.send_signal(true, PulseClass::Tick);

        // Forced idle reset. Each frame trail leaves the line in a
        // non-rest state; this must stay the unconditional last action.
        self.init();
    }

    /// Scaled, chunked blocking delay in milliseconds.
    ///
    /// For callers spacing out consecutive commands. Same shift and
    /// chunking discipline as the pulse delays.
    pub fn delay_ms(&mut self, ms: u32) {
        let platform = &mut self.platform;
        for_each_delay_chunk(ms, TIMER_SHIFT, |chunk| platform.delay_ms(chunk));
    }

    /// Borrow the underlying platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Consume the encoder, releasing the platform.
    pub fn into_platform(self) -> P {
        self.platform
    }

    // --- Private methods ---

    /// One inner frame: lead-in pair, 32 data bits MSB-first, trail.
    fn send_frame(&mut self, code: u32) {
        // Leading zero bit; receivers require it (part of the protocol,
        // rationale unknown upstream).
        self.send_signal(false, PulseClass::Tick);
        self.send_signal(true, PulseClass::Tick);

        let mut mask = 1u32 << 31;
        while mask != 0 {
            let bit = code & mask != 0;

            self.send_signal(bit, PulseClass::Tick);
            self.send_signal(!bit, PulseClass::Tick);

            mask >>= 1;
        }

        self.send_signal(true, PulseClass::Sep);
        // Instantaneous flip to the logical-0 level, no hold. The line is
        // NOT at rest here; part of the protocol. transmit() forces idle
        // as its last action.
        self.send_signal(false, PulseClass::Zero);
    }

    /// Drive the line for one symbol: level per the inversion rule, then a
    /// scaled chunked hold for the class duration.
    fn send_signal(&mut self, bit: bool, class: PulseClass) {
        self.platform.set_level(LineLevel::from_logical(bit));

        let duration = self.table.duration_us(class);
        let platform = &mut self.platform;
        for_each_delay_chunk(duration, TIMER_SHIFT, |chunk| platform.delay_us(chunk));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every platform call for inspection.
    #[derive(Default)]
    struct RecordingLine {
        levels: Vec<LineLevel>,
        delays_us: Vec<u32>,
        delays_ms: Vec<u32>,
        configured: u32,
    }

    impl RfPlatform for RecordingLine {
        fn configure_output(&mut self) {
            self.configured += 1;
        }
        fn set_level(&mut self, level: LineLevel) {
            self.levels.push(level);
        }
        fn delay_us(&mut self, us: u32) {
            self.delays_us.push(us);
        }
        fn delay_ms(&mut self, ms: u32) {
            self.delays_ms.push(ms);
        }
    }

    #[test]
    fn test_construction_leaves_line_idle() {
        let encoder = PulseEncoder::new(RecordingLine::default());
        let line = encoder.platform();

        assert_eq!(line.configured, 1);
        assert_eq!(line.levels, vec![LineLevel::High]);
        assert!(line.delays_us.is_empty());
    }

    #[test]
    fn test_init_idempotent_no_pulse() {
        let mut encoder = PulseEncoder::new(RecordingLine::default());
        encoder.init();
        encoder.init();

        let line = encoder.platform();
        assert_eq!(line.configured, 3);
        // Only idle levels, never a pulse, never a delay.
        assert!(line.levels.iter().all(|l| l.is_idle()));
        assert!(line.delays_us.is_empty());
    }

    #[test]
    fn test_lazy_init_guard_runs_once() {
        let mut encoder = PulseEncoder::new(RecordingLine::default());

        encoder.transmit(0, 1);
        let after_first = encoder.platform().configured;

        encoder.transmit(0, 1);
        let after_second = encoder.platform().configured;

        // new() + guard + forced reset = 3, then only the forced reset.
        assert_eq!(after_first, 3);
        assert_eq!(after_second, 4);
    }

    #[test]
    fn test_transmit_ends_idle() {
        let mut encoder = PulseEncoder::new(RecordingLine::default());
        encoder.transmit(0xDEADBEEF, 3);

        let line = encoder.platform();
        assert_eq!(*line.levels.last().unwrap(), LineLevel::IDLE);
    }

    #[test]
    fn test_delay_ms_chunked() {
        let mut encoder = PulseEncoder::new(RecordingLine::default());
        encoder.delay_ms(25_000);

        let line = encoder.platform();
        assert_eq!(line.delays_ms, vec![10_000, 10_000, 5_000]);
    }
}
