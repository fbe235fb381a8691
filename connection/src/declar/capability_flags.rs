//! Capability flags exchanged during the handshake.
//!
//! see https://dev.mysql.com/doc/internals/en/capability-flags.html

pub const CLIENT_LONG_PASSWORD: u32 = 0x0000_0001;

/// Send found rows instead of affected rows in EOF_Packet.
pub const CLIENT_FOUND_ROWS: u32 = 0x0000_0002;

/// Get all column flags.
///
/// ### Server
/// Supports longer flags.
///
/// ### Client
/// Expects longer flags.
pub const CLIENT_LONG_FLAG: u32 = 0x0000_0004;

/// Database (schema) name can be specified on connect in Handshake Response Packet.
pub const CLIENT_CONNECT_WITH_DB: u32 = 0x0000_0008;

/// Compression protocol supported.
pub const CLIENT_COMPRESS: u32 = 0x0000_0020;

pub const CLIENT_PROTOCOL_41: u32 = 0x0000_0200;

/// Use SSL encryption for the session.
///
/// ### Server
/// Supports SSL.
///
/// ### Client
/// Switch to SSL after sending the capability flags.
pub const CLIENT_SSL: u32 = 0x0000_0800;

/// Client knows about transactions.
///
/// ### Server
/// Can send status flags in OK_Packet / EOF_Packet.
///
/// ### Client
/// Expects status flags in OK_Packet / EOF_Packet.
pub const CLIENT_TRANSACTIONS: u32 = 0x0000_2000;

pub const CLIENT_SECURE_CONNECTION: u32 = 0x0000_8000;

/// Client supports plugin authentication.
///
/// ### Server
/// Sends extra data in the Initial Handshake Packet and supports the
/// pluggable authentication protocol.
///
/// ### Client
/// Supports authentication plugins.
///
/// ### Requires
/// `CLIENT_PROTOCOL_41`
pub const CLIENT_PLUGIN_AUTH: u32 = 0x0008_0000;
