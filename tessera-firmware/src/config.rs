//! Firmware configuration
//!
//! Values come from `reader.toml`, validated and converted to constants by
//! the build script.

include!(concat!(env!("OUT_DIR"), "/reader_config.rs"));

/// Receive ring size in front of the UART, in bytes
pub const RING_SIZE: usize = 64;
