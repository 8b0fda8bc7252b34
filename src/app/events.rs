//! Outbound node events.
//!
//! [`StorageBringup`](super::bringup::StorageBringup) and
//! [`ApplicationSupervisor`](super::supervisor::ApplicationSupervisor) emit
//! these through the [`EventSink`](super::ports::EventSink) port.  Each event
//! carries its own severity and operator-facing message; the text is read by
//! people, not parsed.

use core::fmt;

use log::Level;

use crate::error::{MountFailureKind, StatsFailure};

use super::supervisor::SupervisorState;

/// Structured events emitted by the bring-up and run-loop core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent {
    /// About to attempt a volume mount.
    MountStarted,

    /// The volume was already mounted; nothing was attempted.
    AlreadyMounted,

    /// The volume was mounted.
    Mounted,

    /// The mount failed.
    MountFailed(MountFailureKind),

    /// Volume capacity and usage.
    PartitionSize { total: u64, used: u64 },

    /// Usage statistics could not be queried.
    StatsFailed(StatsFailure),

    /// A boot step failed and startup was abandoned.
    BringupAborted { step: &'static str },

    /// The supervisor moved between lifecycle states.
    StateChanged {
        from: SupervisorState,
        to: SupervisorState,
    },

    /// `initialize()` returned false.
    InitializeFailed,

    /// The service loop exited after `cycles` updates.
    LoopExited { cycles: u64 },
}

impl NodeEvent {
    /// Severity the event is logged at.
    pub fn level(&self) -> Level {
        match self {
            Self::AlreadyMounted => Level::Warn,
            Self::MountFailed(_)
            | Self::StatsFailed(_)
            | Self::BringupAborted { .. }
            | Self::InitializeFailed => Level::Error,
            Self::MountStarted
            | Self::Mounted
            | Self::PartitionSize { .. }
            | Self::StateChanged { .. }
            | Self::LoopExited { .. } => Level::Info,
        }
    }
}

impl fmt::Display for NodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MountStarted => write!(f, "Initializing littlefs"),
            Self::AlreadyMounted => write!(f, "littlefs Already Mounted!"),
            Self::Mounted => write!(f, "Filesystem mounted"),
            Self::MountFailed(kind) => write!(f, "{kind}"),
            Self::PartitionSize { total, used } => {
                write!(f, "Partition size: total: {}, used: {}", total, used)
            }
            Self::StatsFailed(e) => write!(f, "{e}"),
            Self::BringupAborted { step } => {
                write!(f, "!!! Device init aborted at step: {}() !!!", step)
            }
            Self::StateChanged { from, to } => write!(f, "STATE | {:?} -> {:?}", from, to),
            Self::InitializeFailed => {
                write!(f, "Application initialize() failed, service loop not entered")
            }
            Self::LoopExited { cycles } => {
                write!(f, "Service loop exited after {} cycles", cycles)
            }
        }
    }
}
