//! Seeder node firmware library.
//!
//! Exposes the storage bring-up and application supervisor for integration
//! testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod seeder;

/// Component tag carried by every diagnostic line this firmware emits.
pub const LOG_TAG: &str = "AgIsoStack";
