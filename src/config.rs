//! System configuration parameters
//!
//! Mount parameters for the persistent volume and the service-loop cadence.
//! Built once at process start and never mutated afterwards.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::adapters::utils::is_printable_ascii;

/// Longest VFS mount prefix ESP-IDF accepts (`ESP_VFS_PATH_MAX`).
pub const MAX_BASE_PATH_LEN: usize = 15;
/// Longest partition label in the partition table.
pub const MAX_LABEL_LEN: usize = 16;

/// Mount point of the object-pool volume in the reference configuration.
pub const IOP_PARTITION_PATH: &str = "/iop";
/// Partition label of the object-pool volume in the reference configuration.
pub const IOP_PARTITION_LABEL: &str = "iop";

/// Service-loop period in the reference configuration.
pub const DEFAULT_UPDATE_PERIOD_MS: u32 = 50;

/// Errors from config construction or validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Volume
// ───────────────────────────────────────────────────────────────

/// Persistent volume mount parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConfig {
    base_path: String<MAX_BASE_PATH_LEN>,
    partition_label: String<MAX_LABEL_LEN>,
    /// Whether the driver may reformat the partition when no valid
    /// filesystem is found.  Fixed before mount, never decided per failure.
    format_if_mount_failed: bool,
}

impl VolumeConfig {
    pub fn new(
        base_path: &str,
        partition_label: &str,
        format_if_mount_failed: bool,
    ) -> Result<Self, ConfigError> {
        let mut path = String::new();
        path.push_str(base_path).map_err(|()| {
            ConfigError::ValidationFailed("base_path must be at most 15 bytes")
        })?;
        let mut label = String::new();
        label.push_str(partition_label).map_err(|()| {
            ConfigError::ValidationFailed("partition_label must be at most 16 bytes")
        })?;

        let cfg = Self {
            base_path: path,
            partition_label: label,
            format_if_mount_failed,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn partition_label(&self) -> &str {
        &self.partition_label
    }

    pub fn format_if_mount_failed(&self) -> bool {
        self.format_if_mount_failed
    }

    /// Check invariants the length bounds alone don't cover.
    /// Needed after deserialisation, which bypasses [`VolumeConfig::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.starts_with('/') || self.base_path.len() < 2 {
            return Err(ConfigError::ValidationFailed(
                "base_path must be an absolute path below /",
            ));
        }
        if self.base_path.ends_with('/') {
            return Err(ConfigError::ValidationFailed(
                "base_path must not end with /",
            ));
        }
        if !is_printable_ascii(&self.base_path) {
            return Err(ConfigError::ValidationFailed(
                "base_path must be printable ASCII",
            ));
        }
        if self.partition_label.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "partition_label must not be empty",
            ));
        }
        if !is_printable_ascii(&self.partition_label) || self.partition_label.contains(' ') {
            return Err(ConfigError::ValidationFailed(
                "partition_label must be printable ASCII without spaces",
            ));
        }
        Ok(())
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            base_path: String::try_from(IOP_PARTITION_PATH).unwrap_or_default(),
            partition_label: String::try_from(IOP_PARTITION_LABEL).unwrap_or_default(),
            format_if_mount_failed: false,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Supervisor
// ───────────────────────────────────────────────────────────────

/// Service-loop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Suspension between consecutive `update()` calls (milliseconds).
    pub update_period_ms: u32,
}

impl SupervisorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=10_000).contains(&self.update_period_ms) {
            return Err(ConfigError::ValidationFailed(
                "update_period_ms must be 1–10000",
            ));
        }
        Ok(())
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            update_period_ms: DEFAULT_UPDATE_PERIOD_MS, // 20 Hz
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Node
// ───────────────────────────────────────────────────────────────

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub volume: VolumeConfig,
    pub supervisor: SupervisorConfig,
}

impl NodeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.volume.validate()?;
        self.supervisor.validate()
    }
}
