//! Application supervisor: the cooperative scheduler.
//!
//! Sequences the three-phase lifecycle of exactly one [`Application`] and
//! services it at a fixed period:
//!
//! ```text
//!  Created ──▶ Initializing ──false──▶ Aborted
//!                   │ true
//!                   ▼
//!               Running ──stop raised──▶ Terminating ──▶ Stopped
//!                 ▲   │
//!                 └───┘ update · feed watchdog · delay(period)
//! ```
//!
//! The loop is the only thread of control; the period delay is the only
//! suspension point.  `terminate()` is tied to a drop guard created on
//! entry to `Running`, so it runs exactly once on every exit path,
//! including a panic unwinding out of `update()`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::config::SupervisorConfig;

use super::bringup::StorageReady;
use super::events::NodeEvent;
use super::ports::{Application, EventSink, WatchdogPort};

// ───────────────────────────────────────────────────────────────
// State
// ───────────────────────────────────────────────────────────────

/// Lifecycle state of the supervised application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SupervisorState {
    Created = 0,
    Initializing = 1,
    Running = 2,
    Terminating = 3,
    /// Terminal: `terminate()` has returned.
    Stopped = 4,
    /// Terminal: `initialize()` failed.
    Aborted = 5,
}

/// How a supervisor run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// `initialize()` returned false; the loop was never entered.
    Aborted,
    /// The stop signal ended the loop after `cycles` updates.
    Stopped { cycles: u64 },
}

// ───────────────────────────────────────────────────────────────
// Stop signal
// ───────────────────────────────────────────────────────────────

/// External request to leave the service loop.
///
/// Clones share one flag.  Raising it from another task, a timer callback,
/// or the application itself ends the loop at its next check.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ───────────────────────────────────────────────────────────────
// Terminate guard
// ───────────────────────────────────────────────────────────────

/// Calls `terminate()` when dropped.
struct TerminateGuard<'a, A: Application> {
    app: &'a mut A,
}

impl<A: Application> Drop for TerminateGuard<'_, A> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            warn!(target: crate::LOG_TAG, "update() panicked, terminating application");
        }
        self.app.terminate();
    }
}

// ───────────────────────────────────────────────────────────────
// ApplicationSupervisor
// ───────────────────────────────────────────────────────────────

/// Owns one application and drives it from `Created` to a terminal state.
pub struct ApplicationSupervisor<A: Application> {
    app: A,
    state: SupervisorState,
    period_ms: u32,
    stop: StopSignal,
    /// Held for the run: the volume stays claimed while the app is alive.
    _storage: StorageReady,
}

impl<A: Application> ApplicationSupervisor<A> {
    /// Take ownership of `app`.  Requires proof that storage bring-up
    /// succeeded.
    pub fn new(storage: StorageReady, app: A, config: SupervisorConfig, stop: StopSignal) -> Self {
        Self {
            app,
            state: SupervisorState::Created,
            period_ms: config.update_period_ms,
            stop,
            _storage: storage,
        }
    }

    /// Another handle to the signal that ends the service loop.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Run the full lifecycle.  Returns only when the stop signal is raised
    /// or `initialize()` fails.
    pub fn run(
        mut self,
        delay: &mut impl DelayNs,
        watchdog: &mut impl WatchdogPort,
        sink: &mut impl EventSink,
    ) -> RunOutcome {
        transition(&mut self.state, SupervisorState::Initializing, sink);
        if !self.app.initialize() {
            sink.emit(&NodeEvent::InitializeFailed);
            transition(&mut self.state, SupervisorState::Aborted, sink);
            return RunOutcome::Aborted;
        }
        transition(&mut self.state, SupervisorState::Running, sink);

        let mut guard = TerminateGuard { app: &mut self.app };
        let mut cycles: u64 = 0;
        while !self.stop.is_raised() {
            guard.app.update();
            cycles += 1;
            watchdog.feed();
            if self.stop.is_raised() {
                break;
            }
            delay.delay_ms(self.period_ms);
        }

        sink.emit(&NodeEvent::LoopExited { cycles });
        transition(&mut self.state, SupervisorState::Terminating, sink);
        drop(guard);
        transition(&mut self.state, SupervisorState::Stopped, sink);

        RunOutcome::Stopped { cycles }
    }
}

fn transition(state: &mut SupervisorState, to: SupervisorState, sink: &mut impl EventSink) {
    let from = *state;
    *state = to;
    sink.emit(&NodeEvent::StateChanged { from, to });
}
