//! Shared recording mock for the platform contract.
#![allow(dead_code)] // not every test binary uses every helper

use rf433_shutter::{LineLevel, RfPlatform};

/// Everything the encoder asks the platform to do, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Configure,
    Level(LineLevel),
    DelayUs(u32),
    DelayMs(u32),
}

/// Mock transmitter line that records every platform call.
#[derive(Default)]
pub struct RecordingLine {
    pub events: Vec<Event>,
}

impl RecordingLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current electrical level of the line (last level driven).
    pub fn line_level(&self) -> Option<LineLevel> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Level(l) => Some(*l),
            _ => None,
        })
    }

    /// Collapse the recording into (level, held microseconds) emissions,
    /// starting at event index `from`. Chunked delays are summed back into
    /// one duration per emission.
    pub fn emissions_from(&self, from: usize) -> Vec<(LineLevel, u32)> {
        let mut out: Vec<(LineLevel, u32)> = Vec::new();
        for event in &self.events[from..] {
            match event {
                Event::Level(l) => out.push((*l, 0)),
                Event::DelayUs(us) => {
                    if let Some(last) = out.last_mut() {
                        last.1 += us;
                    }
                }
                Event::Configure | Event::DelayMs(_) => {}
            }
        }
        out
    }

    /// Number of recorded events so far; use as the `from` marker.
    pub fn mark(&self) -> usize {
        self.events.len()
    }
}

impl RfPlatform for RecordingLine {
    fn configure_output(&mut self) {
        self.events.push(Event::Configure);
    }

    fn set_level(&mut self, level: LineLevel) {
        self.events.push(Event::Level(level));
    }

    fn delay_us(&mut self, us: u32) {
        self.events.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::DelayMs(ms));
    }
}
