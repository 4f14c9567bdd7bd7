//! RFID reader module drivers
//!
//! The reader module pushes one fixed-size frame per scan onto its serial
//! line and repeats it for as long as the tag stays in the field. The
//! driver here is purely polled: it never buffers, never spawns work and
//! keeps no state between calls.

pub mod packet_reader;
pub mod repeat;

pub use packet_reader::{Error, PacketReader, ReaderState};
pub use repeat::RepeatFilter;
