pub mod bytes;
pub mod commands;
pub mod conn;
pub mod declar;
pub mod packet;

/// Packet constants
pub const PACKET_HEADER_SIZE: usize = 4;
pub const MAX_BODY_LENGTH: usize = 16_777_215;
pub const NULL_TERMINATOR: u8 = 0;

/// utf8, see https://dev.mysql.com/doc/internals/en/character-set.html
pub const UTF8_GENERAL_CI: u8 = 33;

/// Partial reads/writes retried at most this many times per packet.
pub const MAX_IO_RETRIES: usize = 10;
