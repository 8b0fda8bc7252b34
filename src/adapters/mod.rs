//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                   |
//! |------------|--------------------|-------------------------------|
//! | `delay`    | DelayNs            | `std::thread::sleep` (host)   |
//! | `littlefs` | FlashVolumeDriver  | ESP-IDF LittleFS VFS / sim    |
//! | `log_sink` | EventSink          | Serial log output             |

pub mod delay;
pub mod littlefs;
pub mod log_sink;
pub(crate) mod utils;

pub use utils::err_name;
