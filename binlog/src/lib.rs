pub mod column;
pub mod events;
pub mod parser;
pub mod row;
pub mod utils;

pub const NULL_TERMINATOR: u8 = 0;

/// Common header size of every binlog v4 event.
pub const EVENT_HEADER_LEN: usize = 19;

/// Size of the CRC32 trailer appended to events when the master announces
/// `BINLOG_CHECKSUM_ALG_CRC32`.
pub const EVENT_CHECKSUM_LEN: usize = 4;
