//! Stderr diagnostics, enabled by setting `VG5000_FLOAT_DEBUG`.

use once_cell::sync::Lazy;
use std::env;

pub const DEBUG_ENV: &str = "VG5000_FLOAT_DEBUG";

static ENABLED: Lazy<bool> = Lazy::new(|| env::var_os(DEBUG_ENV).is_some());

pub fn enabled() -> bool {
    *ENABLED
}

/// Formats bytes as `0xAA 0xBB ...` for log lines.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("0x{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
