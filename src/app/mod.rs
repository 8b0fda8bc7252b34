//! Application core: bring-up and run-loop logic, zero direct I/O.
//!
//! Storage bring-up and the application supervisor live here.  All
//! interaction with the flash driver, the log, the watchdog and the driven
//! application happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod bringup;
pub mod events;
pub mod ports;
pub mod supervisor;
