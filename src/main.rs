//! shutter-remote - ESP-IDF firmware entry point
//!
//! Drives a 433MHz OOK transmitter module from an ESP32 GPIO:
//! 1. Configure the transmitter data line
//! 2. Send the configured command
//! 3. Drain the diagnostics log to the console

#![no_std]
#![no_main]

use esp_idf_svc::sys as esp_idf_sys;

use rf433_shutter::{enc_info, LineLevel, PulseEncoder, RfPlatform, TxLog, DEFAULT_REPEAT};

/// GPIO number wired to the transmitter's data input.
const RF_TX_GPIO: i32 = 4;

/// Command sent at boot. Replace with the pairing code of the shutter.
const DEMO_CODE: u32 = 0x40A2_B5D1;

static TX_LOG: TxLog = TxLog::new();

/// Transmitter data line on an ESP-IDF GPIO.
///
/// Busy-delays use the ROM microsecond spinner; millisecond delays yield
/// to FreeRTOS since nothing in a pulse train needs them.
struct EspLine {
    gpio: i32,
}

impl RfPlatform for EspLine {
    fn configure_output(&mut self) {
        // SAFETY: plain ESP-IDF GPIO configuration, pin number is valid.
        unsafe {
            esp_idf_sys::gpio_set_direction(self.gpio, esp_idf_sys::gpio_mode_t_GPIO_MODE_OUTPUT);
        }
    }

    fn set_level(&mut self, level: LineLevel) {
        let raw: u32 = match level {
            LineLevel::High => 1,
            LineLevel::Low => 0,
        };
        // SAFETY: pin configured as output in configure_output().
        unsafe {
            esp_idf_sys::gpio_set_level(self.gpio, raw);
        }
    }

    fn delay_us(&mut self, us: u32) {
        // SAFETY: ROM busy-wait, safe for any argument.
        unsafe {
            esp_idf_sys::esp_rom_delay_us(us);
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            // SAFETY: as above.
            unsafe {
                esp_idf_sys::esp_rom_delay_us(1_000);
            }
        }
    }
}

fn timestamp_us() -> i64 {
    // SAFETY: esp_timer_get_time is always safe to call.
    unsafe { esp_idf_sys::esp_timer_get_time() }
}

fn level_cstr(level: rf433_shutter::LogLevel) -> *const core::ffi::c_char {
    use rf433_shutter::LogLevel;
    let bytes: &'static [u8] = match level {
        LogLevel::Error => b"ERROR\0",
        LogLevel::Warn => b"WARN\0",
        LogLevel::Info => b"INFO\0",
        LogLevel::Debug => b"DEBUG\0",
    };
    bytes.as_ptr() as *const core::ffi::c_char
}

/// Print any pending log entries through the ESP-IDF console.
fn drain_log() {
    while let Some(entry) = TX_LOG.drain() {
        // SAFETY: printf with a fixed format string and bounded args.
        unsafe {
            esp_idf_sys::printf(
                b"[%8lld] %s %.*s\n\0".as_ptr() as *const core::ffi::c_char,
                entry.timestamp_us,
                level_cstr(entry.level),
                entry.len as i32,
                entry.msg.as_ptr(),
            );
        }
    }
}

#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    let line = EspLine { gpio: RF_TX_GPIO };
    let mut encoder = PulseEncoder::new(line);

    let start = timestamp_us();
    encoder.transmit(DEMO_CODE, DEFAULT_REPEAT);
    let elapsed = timestamp_us() - start;

    enc_info!(
        TX_LOG,
        timestamp_us(),
        "tx code={:08X} repeat={} took {}us",
        DEMO_CODE,
        DEFAULT_REPEAT,
        elapsed
    );
    drain_log();

    loop {
        // Nothing further to do; idle.
        unsafe {
            esp_idf_sys::vTaskDelay(1000);
        }
    }
}
