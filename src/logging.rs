//! Transmit diagnostics log.
//!
//! The pulse path is timing-critical: a blocking print in the middle of a
//! frame stretches a pulse and corrupts the transmission. Diagnostics go
//! through a fixed-capacity ring instead; pushing never blocks, and a
//! background context (UART thread on target, the test body on host)
//! drains at leisure.
//!
//! There is exactly one encoder per line and transmissions are serialized
//! by the caller, so the ring is single-producer single-consumer. Messages
//! are dropped, not queued, when the ring is full.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length in bytes.
pub const MAX_MSG_LEN: usize = 96;

/// Default ring capacity (entries). Must be a power of two.
pub const TX_LOG_SIZE: usize = 64;

/// Log severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// One diagnostic record.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in microseconds (platform clock).
    pub timestamp_us: i64,
    pub level: LogLevel,
    /// Message length in bytes.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message as a str, lossy on invalid UTF-8.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf-8>")
    }
}

/// Single-producer single-consumer log ring.
///
/// The producer is the transmit context; the consumer is whatever drains
/// to the operator. Head and tail are atomics so the two sides may live on
/// different cores; entry slots are only ever touched by the side that
/// owns them per the index protocol.
pub struct TxLog<const N: usize = TX_LOG_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    head: AtomicU32,
    tail: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: one producer writes slots between tail and head, one consumer
// reads slots behind head; acquire/release on the indices orders the slot
// accesses. No third party touches the buffer.
unsafe impl<const N: usize> Sync for TxLog<N> {}
unsafe impl<const N: usize> Send for TxLog<N> {}

impl<const N: usize> TxLog<N> {
    const MASK: usize = N - 1;

    /// Create an empty log ring.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "log ring size must be a power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push an entry. Never blocks.
    ///
    /// Returns `false` (and counts a drop) when the ring is full.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);

        if head.wrapping_sub(tail) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (head as usize) & Self::MASK;

        // SAFETY: single producer; this slot is ours until head advances.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// Pop the oldest entry, if any.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);

        if tail == head {
            return None;
        }

        let idx = (tail as usize) & Self::MASK;

        // SAFETY: single consumer; the producer released this slot when it
        // advanced head past it.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        head.wrapping_sub(tail)
    }

    /// Messages dropped because the ring was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for TxLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format into a byte buffer without allocation.
///
/// Returns the number of bytes written; output is truncated to the buffer.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Push a formatted entry to a [`TxLog`].
///
/// # Example
///
/// ```ignore
/// enc_log!(LogLevel::Info, TX_LOG, now_us, "tx code={:08X} repeat={}", code, repeat);
/// ```
#[macro_export]
macro_rules! enc_log {
    ($level:expr, $log:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $log.push($timestamp, $level, &buf[..len]);
    }};
}

/// Info-level [`enc_log!`].
#[macro_export]
macro_rules! enc_info {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::enc_log!($crate::logging::LogLevel::Info, $log, $timestamp, $($arg)*)
    };
}

/// Warn-level [`enc_log!`].
#[macro_export]
macro_rules! enc_warn {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::enc_log!($crate::logging::LogLevel::Warn, $log, $timestamp, $($arg)*)
    };
}

/// Error-level [`enc_log!`].
#[macro_export]
macro_rules! enc_error {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::enc_log!($crate::logging::LogLevel::Error, $log, $timestamp, $($arg)*)
    };
}
