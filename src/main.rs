//! Seeder node firmware: main entry point.
//!
//! Strictly sequential bring-up, then a cooperative service loop:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  LittleFsDriver      LogEventSink   Watchdog     FreeRtos      │
//! │  (FlashVolumeDriver) (EventSink)    (Watchdog)   (DelayNs)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  StorageBringup ──StorageReady──▶ ApplicationSupervisor<Seeder>│
//! │  mount · stats                    initialize · update · term   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info, warn};

use seedernode::LOG_TAG;
use seedernode::adapters::littlefs::LittleFsDriver;
use seedernode::adapters::log_sink::LogEventSink;
use seedernode::app::bringup::{Capacity, StorageBringup};
use seedernode::app::supervisor::{ApplicationSupervisor, RunOutcome, StopSignal};
use seedernode::config::NodeConfig;
use seedernode::drivers::watchdog::Watchdog;
use seedernode::seeder::Seeder;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!(target: LOG_TAG, "══════════════════════════════════════");
    info!(target: LOG_TAG, "  Seeder node v{}", env!("CARGO_PKG_VERSION"));
    info!(target: LOG_TAG, "══════════════════════════════════════");

    // ── 2. Configuration (fixed for the process lifetime) ─────
    let config = NodeConfig::default();
    config.validate()?;

    let mut log_sink = LogEventSink::new();

    // ── 3. Storage bring-up ───────────────────────────────────
    let mut storage = StorageBringup::new(LittleFsDriver::new(), config.volume.clone());
    // The sink has already reported the failure and the aborted step.
    let Ok((ready, capacity)) = storage.bring_up(&mut log_sink) else {
        return Ok(());
    };
    if capacity == Capacity::Unknown {
        warn!(target: LOG_TAG, "Continuing with unknown volume capacity");
    }

    // ── 4. Application ────────────────────────────────────────
    let seeder = Seeder::new(ready.base_path(), config.supervisor.update_period_ms);
    // Nothing raises the stop signal in the field build; the loop runs
    // until reset.
    let stop = StopSignal::new();
    let supervisor = ApplicationSupervisor::new(ready, seeder, config.supervisor, stop);

    let mut watchdog = Watchdog::default();
    let mut delay = FreeRtos;

    info!(target: LOG_TAG, "System ready. Entering service loop.");

    // ── 5. Service loop ───────────────────────────────────────
    match supervisor.run(&mut delay, &mut watchdog, &mut log_sink) {
        RunOutcome::Aborted => {
            error!(target: LOG_TAG, "!!! Device init aborted at step: Seeder::initialize() !!!");
        }
        RunOutcome::Stopped { cycles } => {
            info!(target: LOG_TAG, "Service loop stopped after {} cycles", cycles);
        }
    }

    Ok(())
}
