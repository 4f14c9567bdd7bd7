//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod reader;
pub mod tag;

pub use reader::reader_task;
pub use tag::tag_task;
