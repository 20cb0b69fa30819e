// rf433-shutter - Build Script
//
// Exports the ESP-IDF build environment when building the firmware binary.

fn main() {
    // Only the esp32 firmware build needs the ESP-IDF environment.
    if std::env::var_os("CARGO_FEATURE_ESP32").is_some() {
        embuild::espidf::sysenv::output();
    }

    println!("cargo:rerun-if-changed=build.rs");
}
