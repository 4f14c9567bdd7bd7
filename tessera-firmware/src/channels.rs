//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use tessera_protocol::TagCode;

/// Channel capacity for scanned tags
const TAG_CHANNEL_SIZE: usize = 4;

/// Tag codes decoded by the reader task
pub static TAG_CHANNEL: Channel<CriticalSectionRawMutex, TagCode, TAG_CHANNEL_SIZE> =
    Channel::new();
