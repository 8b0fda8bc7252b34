//! Persistent storage bring-up.
//!
//! [`StorageBringup`] owns the flash volume driver and the immutable mount
//! parameters.  It idempotently makes the named volume available, classifies
//! every failure exactly once, and hands out a [`StorageReady`] proof token
//! that the rest of boot needs before it may touch the volume.
//!
//! ```text
//!  mount() ──▶ already mounted? ──yes──▶ AlreadyMounted (warn)
//!                   │ no
//!                   ▼
//!              driver.register ──ok──▶ Mounted (info)
//!                   │ err(status)
//!                   ▼
//!              Failed(MountFailureKind::from_status) (error)
//! ```

use heapless::String;

use crate::config::{MAX_BASE_PATH_LEN, MAX_LABEL_LEN, VolumeConfig};
use crate::error::{Error, MountFailureKind, Result, StatsFailure};

use super::events::NodeEvent;
use super::ports::{EventSink, FlashVolumeDriver};

/// Boot step name reported when the mount fails.
const MOUNT_STEP: &str = "mount_storage";

// ───────────────────────────────────────────────────────────────
// Outcomes
// ───────────────────────────────────────────────────────────────

/// Result of a [`StorageBringup::mount`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// The volume was mounted before this call; nothing was attempted.
    AlreadyMounted,
    /// This call mounted the volume.
    Mounted,
    /// The driver refused the mount.
    Failed(MountFailureKind),
}

impl MountOutcome {
    /// Whether the volume is usable after this outcome.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::AlreadyMounted | Self::Mounted)
    }
}

/// Capacity and usage of a mounted volume.  `used_bytes <= total_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeStats {
    total_bytes: u64,
    used_bytes: u64,
}

impl VolumeStats {
    pub fn new(total_bytes: u64, used_bytes: u64) -> core::result::Result<Self, StatsFailure> {
        if used_bytes > total_bytes {
            return Err(StatsFailure::Inconsistent {
                total: total_bytes,
                used: used_bytes,
            });
        }
        Ok(Self {
            total_bytes,
            used_bytes,
        })
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn free_bytes(&self) -> u64 {
        self.total_bytes - self.used_bytes
    }
}

/// Capacity as known to the rest of boot.  A failed statistics query
/// yields `Unknown`, never a zero-sized volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Known(VolumeStats),
    Unknown,
}

/// Proof that the volume is mounted.
///
/// Only [`StorageBringup`] can create one, and only after a mount that
/// returned `AlreadyMounted` or `Mounted`.
#[derive(Debug)]
pub struct StorageReady {
    base_path: String<MAX_BASE_PATH_LEN>,
    partition_label: String<MAX_LABEL_LEN>,
}

impl StorageReady {
    /// VFS mount point of the ready volume.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn partition_label(&self) -> &str {
        &self.partition_label
    }
}

// ───────────────────────────────────────────────────────────────
// StorageBringup
// ───────────────────────────────────────────────────────────────

/// Mounts and inspects one persistent volume.
pub struct StorageBringup<D: FlashVolumeDriver> {
    driver: D,
    config: VolumeConfig,
    last_outcome: Option<MountOutcome>,
}

impl<D: FlashVolumeDriver> StorageBringup<D> {
    pub fn new(driver: D, config: VolumeConfig) -> Self {
        Self {
            driver,
            config,
            last_outcome: None,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Ensure the configured volume is mounted.
    ///
    /// Emits one info event before the attempt and one event for the
    /// outcome.  Safe to call repeatedly: once mounted, later calls return
    /// [`MountOutcome::AlreadyMounted`] without a new driver registration.
    pub fn mount(&mut self, sink: &mut impl EventSink) -> MountOutcome {
        sink.emit(&NodeEvent::MountStarted);

        let label = self.config.partition_label();
        let outcome = if self.driver.is_mounted(label) {
            sink.emit(&NodeEvent::AlreadyMounted);
            MountOutcome::AlreadyMounted
        } else {
            match self.driver.register(&self.config) {
                Ok(()) => {
                    sink.emit(&NodeEvent::Mounted);
                    MountOutcome::Mounted
                }
                Err(status) => {
                    let kind = MountFailureKind::from_status(status);
                    sink.emit(&NodeEvent::MountFailed(kind));
                    MountOutcome::Failed(kind)
                }
            }
        };

        self.last_outcome = Some(outcome);
        outcome
    }

    /// Proof token for the volume, if the last mount succeeded.
    pub fn ready(&self) -> Option<StorageReady> {
        self.last_outcome
            .filter(MountOutcome::is_ready)
            .map(|_| self.token())
    }

    // Both fields are validated against the same capacities at config
    // construction, so the copies cannot truncate.
    fn token(&self) -> StorageReady {
        StorageReady {
            base_path: String::try_from(self.config.base_path()).unwrap_or_default(),
            partition_label: String::try_from(self.config.partition_label()).unwrap_or_default(),
        }
    }

    /// Query capacity and usage of the mounted volume.
    ///
    /// Failures are logged with the platform diagnostic and returned; the
    /// caller must treat capacity as unknown.
    pub fn stats(
        &self,
        ready: &StorageReady,
        sink: &mut impl EventSink,
    ) -> core::result::Result<VolumeStats, StatsFailure> {
        let result = self
            .driver
            .info(ready.partition_label())
            .map_err(StatsFailure::Driver)
            .and_then(|(total, used)| VolumeStats::new(total, used));

        match result {
            Ok(stats) => sink.emit(&NodeEvent::PartitionSize {
                total: stats.total_bytes(),
                used: stats.used_bytes(),
            }),
            Err(e) => sink.emit(&NodeEvent::StatsFailed(e)),
        }
        result
    }

    /// Boot step: mount, then report capacity.
    ///
    /// A mount failure aborts startup.  A statistics failure does not; the
    /// capacity is reported as [`Capacity::Unknown`].
    pub fn bring_up(&mut self, sink: &mut impl EventSink) -> Result<(StorageReady, Capacity)> {
        if let MountOutcome::Failed(kind) = self.mount(sink) {
            sink.emit(&NodeEvent::BringupAborted { step: MOUNT_STEP });
            return Err(Error::Storage(kind));
        }

        let ready = self.token();
        let capacity = match self.stats(&ready, sink) {
            Ok(stats) => Capacity::Known(stats),
            Err(_) => Capacity::Unknown,
        };
        Ok((ready, capacity))
    }
}
