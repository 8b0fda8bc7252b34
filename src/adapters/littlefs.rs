//! LittleFS flash volume adapter.
//!
//! Implements [`FlashVolumeDriver`] for the node's persistent volumes.
//!
//! - **`target_os = "espidf"`**: wraps the `joltwallet/littlefs` component
//!   (`esp_vfs_littlefs_register`, `esp_littlefs_mounted`,
//!   `esp_littlefs_info`).
//! - **`not(target_os = "espidf")`**: an in-memory partition table that
//!   reproduces the driver's status codes for host testing and simulation.

use log::info;

use crate::LOG_TAG;
use crate::app::ports::FlashVolumeDriver;
use crate::config::VolumeConfig;
use crate::error::DriverStatus;

#[cfg(target_os = "espidf")]
use super::utils::to_c_buf;
#[cfg(target_os = "espidf")]
use crate::config::{MAX_BASE_PATH_LEN, MAX_LABEL_LEN};
#[cfg(target_os = "espidf")]
use crate::error::ESP_ERR_INVALID_ARG;
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::ESP_OK;
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::littlefs::{
    esp_littlefs_info, esp_littlefs_mounted, esp_vfs_littlefs_conf_t, esp_vfs_littlefs_register,
};

#[cfg(not(target_os = "espidf"))]
use crate::error::{ESP_ERR_INVALID_STATE, ESP_ERR_NOT_FOUND, ESP_FAIL};
#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

/// Bytes a freshly formatted LittleFS volume occupies (two metadata blocks).
#[cfg(not(target_os = "espidf"))]
pub const SIM_FORMATTED_USED_BYTES: u64 = 2 * 4096;

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone)]
struct SimPartition {
    capacity: u64,
    used: u64,
    formatted: bool,
    encrypted: bool,
    mounted: bool,
}

pub struct LittleFsDriver {
    #[cfg(not(target_os = "espidf"))]
    partitions: HashMap<String, SimPartition>,
}

impl LittleFsDriver {
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        info!(target: LOG_TAG, "LittleFsDriver: ESP-IDF VFS backend");

        #[cfg(not(target_os = "espidf"))]
        info!(target: LOG_TAG, "LittleFsDriver: simulation backend");

        Self {
            #[cfg(not(target_os = "espidf"))]
            partitions: HashMap::new(),
        }
    }
}

impl Default for LittleFsDriver {
    fn default() -> Self {
        Self::new()
    }
}

// ── Simulation partition table ──────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl LittleFsDriver {
    /// Add a partition that already holds a valid filesystem.
    pub fn with_partition(mut self, label: &str, capacity: u64, used: u64) -> Self {
        self.partitions.insert(
            label.to_owned(),
            SimPartition {
                capacity,
                used: used.min(capacity),
                formatted: true,
                encrypted: false,
                mounted: false,
            },
        );
        self
    }

    /// Add an erased partition with no filesystem on it.
    pub fn with_blank_partition(mut self, label: &str, capacity: u64) -> Self {
        self.partitions.insert(
            label.to_owned(),
            SimPartition {
                capacity,
                used: 0,
                formatted: false,
                encrypted: false,
                mounted: false,
            },
        );
        self
    }

    /// Add a partition flagged as flash-encrypted, which LittleFS refuses.
    pub fn with_encrypted_partition(mut self, label: &str, capacity: u64) -> Self {
        self.partitions.insert(
            label.to_owned(),
            SimPartition {
                capacity,
                used: 0,
                formatted: true,
                encrypted: true,
                mounted: false,
            },
        );
        self
    }

    /// Whether the partition holds a valid filesystem.
    pub fn is_formatted(&self, label: &str) -> bool {
        self.partitions.get(label).is_some_and(|p| p.formatted)
    }
}

// ── FlashVolumeDriver: simulation ───────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl FlashVolumeDriver for LittleFsDriver {
    fn is_mounted(&self, partition_label: &str) -> bool {
        self.partitions
            .get(partition_label)
            .is_some_and(|p| p.mounted)
    }

    fn register(&mut self, config: &VolumeConfig) -> Result<(), DriverStatus> {
        let part = self
            .partitions
            .get_mut(config.partition_label())
            .ok_or(ESP_ERR_NOT_FOUND)?;

        if part.mounted || part.encrypted {
            return Err(ESP_ERR_INVALID_STATE);
        }
        if !part.formatted {
            if !config.format_if_mount_failed() {
                return Err(ESP_FAIL);
            }
            info!(
                target: LOG_TAG,
                "LittleFsDriver(sim): formatting '{}' ({} bytes)",
                config.partition_label(),
                part.capacity
            );
            part.formatted = true;
            part.used = SIM_FORMATTED_USED_BYTES.min(part.capacity);
        }

        part.mounted = true;
        info!(
            target: LOG_TAG,
            "LittleFsDriver(sim): '{}' mounted at {}",
            config.partition_label(),
            config.base_path()
        );
        Ok(())
    }

    fn info(&self, partition_label: &str) -> Result<(u64, u64), DriverStatus> {
        let part = self
            .partitions
            .get(partition_label)
            .ok_or(ESP_ERR_NOT_FOUND)?;
        if !part.mounted {
            return Err(ESP_ERR_INVALID_STATE);
        }
        Ok((part.capacity, part.used))
    }
}

// ── FlashVolumeDriver: ESP-IDF ──────────────────────────────────

#[cfg(target_os = "espidf")]
impl FlashVolumeDriver for LittleFsDriver {
    fn is_mounted(&self, partition_label: &str) -> bool {
        let Some(label) = to_c_buf::<{ MAX_LABEL_LEN + 1 }>(partition_label) else {
            return false;
        };
        // SAFETY: `label` is NUL-terminated and outlives the call.
        unsafe { esp_littlefs_mounted(label.as_ptr().cast()) }
    }

    fn register(&mut self, config: &VolumeConfig) -> Result<(), DriverStatus> {
        let base_path =
            to_c_buf::<{ MAX_BASE_PATH_LEN + 1 }>(config.base_path()).ok_or(ESP_ERR_INVALID_ARG)?;
        let label = to_c_buf::<{ MAX_LABEL_LEN + 1 }>(config.partition_label())
            .ok_or(ESP_ERR_INVALID_ARG)?;

        let mut conf = esp_vfs_littlefs_conf_t::default();
        conf.base_path = base_path.as_ptr().cast();
        conf.partition_label = label.as_ptr().cast();
        conf.set_format_if_mount_failed(u8::from(config.format_if_mount_failed()));

        // SAFETY: `conf` and both C strings outlive the call; the component
        // copies the path and label into its own context.
        let ret = unsafe { esp_vfs_littlefs_register(&conf) };
        if ret != ESP_OK as i32 {
            return Err(ret);
        }
        Ok(())
    }

    fn info(&self, partition_label: &str) -> Result<(u64, u64), DriverStatus> {
        let label =
            to_c_buf::<{ MAX_LABEL_LEN + 1 }>(partition_label).ok_or(ESP_ERR_INVALID_ARG)?;
        let mut total: usize = 0;
        let mut used: usize = 0;

        // SAFETY: `label` is NUL-terminated; out-pointers are valid locals.
        let ret = unsafe { esp_littlefs_info(label.as_ptr().cast(), &mut total, &mut used) };
        if ret != ESP_OK as i32 {
            return Err(ret);
        }
        Ok((total as u64, used as u64))
    }
}
