//! Unified error types for the seeder node firmware.
//!
//! A single `Error` enum that every bring-up step can convert into, so the
//! boot sequence in `main` handles failures uniformly.  All variants are
//! `Copy`: they travel through the event sink and back to `main` without
//! allocation.

use core::fmt;

use crate::adapters::utils::err_name;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible bring-up operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The persistent volume could not be mounted.
    Storage(MountFailureKind),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Driver status codes
// ---------------------------------------------------------------------------

/// Raw status code reported by the flash filesystem driver (`esp_err_t`).
pub type DriverStatus = i32;

/// Generic failure.
pub const ESP_FAIL: DriverStatus = -1;
/// Out of memory.
pub const ESP_ERR_NO_MEM: DriverStatus = 0x101;
/// Invalid argument.
pub const ESP_ERR_INVALID_ARG: DriverStatus = 0x102;
/// Invalid state.
pub const ESP_ERR_INVALID_STATE: DriverStatus = 0x103;
/// Requested resource not found.
pub const ESP_ERR_NOT_FOUND: DriverStatus = 0x105;

// ---------------------------------------------------------------------------
// Mount failures
// ---------------------------------------------------------------------------

/// Why a volume mount failed.
///
/// Classification happens once, at the point of detection, from the raw
/// driver status.  The status set is open-ended: anything not recognised
/// lands in [`MountFailureKind::Other`] with the code kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountFailureKind {
    /// No valid filesystem and formatting failed or was not permitted.
    GenericMountOrFormatFailure,
    /// Driver objects could not be allocated.
    OutOfMemory,
    /// Driver reports an invalid state: mounted elsewhere or encrypted.
    AlreadyMountedOrEncrypted,
    /// No partition carries the requested label.
    VolumeNotFound,
    /// Unmapped status, carrying the platform diagnostic code.
    Other(DriverStatus),
}

impl MountFailureKind {
    /// Total mapping from driver status to failure kind.
    pub const fn from_status(status: DriverStatus) -> Self {
        match status {
            ESP_FAIL => Self::GenericMountOrFormatFailure,
            ESP_ERR_NO_MEM => Self::OutOfMemory,
            ESP_ERR_INVALID_STATE => Self::AlreadyMountedOrEncrypted,
            ESP_ERR_NOT_FOUND => Self::VolumeNotFound,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for MountFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenericMountOrFormatFailure => write!(f, "Failed to mount or format filesystem"),
            Self::OutOfMemory => write!(f, "objects could not be allocated"),
            Self::AlreadyMountedOrEncrypted => {
                write!(f, "already mounted or partition is encrypted")
            }
            Self::VolumeNotFound => write!(f, "Failed to find littlefs partition"),
            Self::Other(code) => write!(f, "Failed to initialize littlefs ({})", err_name(*code)),
        }
    }
}

impl From<MountFailureKind> for Error {
    fn from(e: MountFailureKind) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Statistics failures
// ---------------------------------------------------------------------------

/// Usage statistics could not be obtained.  Capacity is then unknown,
/// never zero; boot carries on, so this never becomes an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFailure {
    /// The driver rejected the query.
    Driver(DriverStatus),
    /// The driver reported more bytes used than the volume holds.
    Inconsistent { total: u64, used: u64 },
}

impl fmt::Display for StatsFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver(code) => write!(
                f,
                "Failed to get littlefs partition information ({})",
                err_name(*code)
            ),
            Self::Inconsistent { total, used } => write!(
                f,
                "littlefs partition information inconsistent (total: {}, used: {})",
                total, used
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
