//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing node events to the `log` facade
//! (the ESP-IDF logger on the device: UART / USB-CDC).  Every line carries
//! the [`LOG_TAG`](crate::LOG_TAG) target so operators can filter on it.

use log::{error, log};

use crate::LOG_TAG;
use crate::app::events::NodeEvent;
use crate::app::ports::EventSink;
use crate::error::MountFailureKind;

/// Adapter that logs every [`NodeEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &NodeEvent) {
        match event {
            NodeEvent::MountFailed(kind @ MountFailureKind::Other(code)) => {
                error!(target: LOG_TAG, "{} [status={:#x}]", kind, code);
            }
            other => log!(target: LOG_TAG, other.level(), "{}", other),
        }
    }
}
