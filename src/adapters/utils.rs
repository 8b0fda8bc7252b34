//! Shared helpers for the adapter layer.
//!
//! Status-code naming and string validation used by the LittleFS adapter,
//! the error types, and configuration checks.

use crate::error::DriverStatus;

/// Returns `true` if every byte of `s` is in the printable ASCII range
/// `0x20..=0x7E` (space through tilde, inclusive).
///
/// Used to validate mount paths and partition labels before they are
/// handed to the C driver.
pub(crate) fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Human-readable name of a driver status code.
#[cfg(target_os = "espidf")]
pub fn err_name(code: DriverStatus) -> &'static str {
    // SAFETY: esp_err_to_name returns a pointer into a static table (or a
    // static "UNKNOWN ERROR" literal); never null, never freed.
    let name = unsafe { core::ffi::CStr::from_ptr(esp_idf_svc::sys::esp_err_to_name(code)) };
    name.to_str().unwrap_or("UNKNOWN ERROR")
}

/// Human-readable name of a driver status code (host table).
#[cfg(not(target_os = "espidf"))]
pub fn err_name(code: DriverStatus) -> &'static str {
    match code {
        0 => "ESP_OK",
        -1 => "ESP_FAIL",
        0x101 => "ESP_ERR_NO_MEM",
        0x102 => "ESP_ERR_INVALID_ARG",
        0x103 => "ESP_ERR_INVALID_STATE",
        0x104 => "ESP_ERR_INVALID_SIZE",
        0x105 => "ESP_ERR_NOT_FOUND",
        0x106 => "ESP_ERR_NOT_SUPPORTED",
        0x107 => "ESP_ERR_TIMEOUT",
        _ => "UNKNOWN ERROR",
    }
}

/// Copy `s` into a NUL-terminated buffer for FFI.
///
/// Returns `None` if `s` does not fit alongside the terminator or contains
/// an interior NUL.
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
pub(crate) fn to_c_buf<const N: usize>(s: &str) -> Option<[u8; N]> {
    let bytes = s.as_bytes();
    if bytes.len() >= N || bytes.contains(&0) {
        return None;
    }
    let mut buf = [0u8; N];
    buf[..bytes.len()].copy_from_slice(bytes);
    Some(buf)
}
