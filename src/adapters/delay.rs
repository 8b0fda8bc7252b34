//! Host delay adapter.
//!
//! [`StdDelay`] implements `embedded_hal::delay::DelayNs` on top of
//! `std::thread::sleep`.  On the device the supervisor is handed
//! `esp_idf_hal::delay::FreeRtos` instead, which yields to the scheduler
//! through `vTaskDelay`.

use embedded_hal::delay::DelayNs;

/// Blocking delay backed by the OS sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl StdDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
