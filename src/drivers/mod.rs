//! Peripheral drivers.

pub mod watchdog;
