//! Seeder application shell.
//!
//! The concrete [`Application`] the node runs.  It owns the object-pool
//! volume once storage is up: `initialize()` checks the volume is readable
//! and inventories the ISOBUS object pools (`*.iop`) stored on it.  The
//! implement-control protocol stack plugs in behind `update()`.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::LOG_TAG;
use crate::app::ports::Application;

/// File extension of serialised VT object pools.
pub const OBJECT_POOL_EXTENSION: &str = "iop";

/// Interval between heartbeat log lines.
const HEARTBEAT_INTERVAL_MS: u32 = 10_000;

pub struct Seeder {
    volume_root: PathBuf,
    object_pools: Vec<PathBuf>,
    cycles: u64,
    heartbeat_every: u64,
}

impl Seeder {
    /// `volume_root` is the mount point of the object-pool volume.
    pub fn new(volume_root: impl Into<PathBuf>, update_period_ms: u32) -> Self {
        let heartbeat_every = u64::from((HEARTBEAT_INTERVAL_MS / update_period_ms.max(1)).max(1));
        Self {
            volume_root: volume_root.into(),
            object_pools: Vec::new(),
            cycles: 0,
            heartbeat_every,
        }
    }

    /// Object pools found by the last `initialize()`, sorted by path.
    pub fn object_pools(&self) -> &[PathBuf] {
        &self.object_pools
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn is_object_pool(path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(OBJECT_POOL_EXTENSION))
    }
}

impl Application for Seeder {
    fn initialize(&mut self) -> bool {
        let entries = match std::fs::read_dir(&self.volume_root) {
            Ok(entries) => entries,
            Err(e) => {
                error!(
                    target: LOG_TAG,
                    "Seeder: volume {} unreadable: {}",
                    self.volume_root.display(),
                    e
                );
                return false;
            }
        };

        let mut pools: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| Self::is_object_pool(path))
            .collect();
        pools.sort();

        info!(
            target: LOG_TAG,
            "Seeder: {} object pool(s) on {}",
            pools.len(),
            self.volume_root.display()
        );
        for pool in &pools {
            info!(target: LOG_TAG, "Seeder:   {}", pool.display());
        }

        self.object_pools = pools;
        self.cycles = 0;
        true
    }

    fn update(&mut self) {
        self.cycles += 1;
        if self.cycles % self.heartbeat_every == 0 {
            info!(target: LOG_TAG, "Seeder: heartbeat, {} cycles", self.cycles);
        }
    }

    fn terminate(&mut self) {
        info!(
            target: LOG_TAG,
            "Seeder: terminated after {} cycles",
            self.cycles
        );
        self.object_pools.clear();
    }
}
