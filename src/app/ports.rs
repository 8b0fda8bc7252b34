//! Port traits: the hexagonal boundary between bring-up logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ StorageBringup / ApplicationSupervisor
//! ```
//!
//! Driven adapters (flash filesystem, event sinks, watchdog) and the driven
//! application implement these traits.  The domain core consumes them via
//! generics, so it never touches ESP-IDF directly and every collaborator can
//! be swapped for an in-memory double on the host.

use crate::config::VolumeConfig;
use crate::error::DriverStatus;

// ───────────────────────────────────────────────────────────────
// Flash volume driver (driven adapter: domain ↔ flash filesystem)
// ───────────────────────────────────────────────────────────────

/// Mount / stat contract of the persistent flash filesystem driver.
///
/// Errors are raw driver status codes; classification is the caller's job.
pub trait FlashVolumeDriver {
    /// Whether the partition with this label is already mounted.
    fn is_mounted(&self, partition_label: &str) -> bool;

    /// Register (mount) the volume described by `config` into the VFS.
    ///
    /// When `config.format_if_mount_failed()` is set the driver may reformat
    /// a partition holding no valid filesystem.
    fn register(&mut self, config: &VolumeConfig) -> Result<(), DriverStatus>;

    /// Total and used bytes of a mounted partition, in that order.
    fn info(&self, partition_label: &str) -> Result<(u64, u64), DriverStatus>;
}

// ───────────────────────────────────────────────────────────────
// Application lifecycle (driven application: supervisor → app)
// ───────────────────────────────────────────────────────────────

/// Lifecycle contract of the application the supervisor drives.
///
/// `update()` is called from a cooperative loop and must not block: a
/// stalled update stalls the whole device.
pub trait Application {
    /// One-time initialisation.  On `false` nothing else is called, so the
    /// application must release anything it acquired before failing.
    fn initialize(&mut self) -> bool;

    /// Periodic servicing.
    fn update(&mut self);

    /// Teardown.  Called exactly once after a successful `initialize()`.
    fn terminate(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`NodeEvent`](super::events::NodeEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::NodeEvent);
}

// ───────────────────────────────────────────────────────────────
// Watchdog port (driven adapter: domain → task watchdog)
// ───────────────────────────────────────────────────────────────

/// Task watchdog fed once per service-loop iteration.
pub trait WatchdogPort {
    fn feed(&mut self);
}
