use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use bytes::Buf;

use binlog::utils::{read_bytes, read_null_term_string};
use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::declar::capability_flags;

/// Lowest protocol version this client speaks.
pub const PROTOCOL_VERSION: u8 = 10;

const SALT_PART_1_LEN: usize = 8;
const SALT_PART_2_MAX_LEN: usize = 13;

/// Initial handshake packet (server greeting).
///
/// see https://dev.mysql.com/doc/internals/en/connection-phase-packets.html#packet-Protocol::Handshake
#[derive(Debug, Clone)]
pub struct HandshakePacket {
    pub protocol_version: u8,
    pub server_version: String,
    pub connection_id: u32,

    /// Assembled auth-plugin data; the first 20 bytes are usable salt.
    pub scramble: Vec<u8>,

    pub server_capabilities: u32,
    pub character_set: u8,
    pub status_flags: u16,
}

impl HandshakePacket {
    pub fn parse(packet: &[u8]) -> CResult<Self> {
        let mut cursor = Cursor::new(packet);

        let protocol_version = cursor.read_u8()?;
        if protocol_version < PROTOCOL_VERSION {
            return Err(RelayError::Capability(format!(
                "server protocol version {} < {}",
                protocol_version, PROTOCOL_VERSION
            )));
        }

        let server_version = read_null_term_string(&mut cursor)?;
        let connection_id = cursor.read_u32::<LittleEndian>()?;

        let mut scramble = read_bytes(&mut cursor, SALT_PART_1_LEN)?;
        cursor.read_u8()?; // filler

        let mut server_capabilities = cursor.read_u16::<LittleEndian>()? as u32;
        if server_capabilities & capability_flags::CLIENT_PROTOCOL_41 == 0 {
            return Err(RelayError::Capability(format!(
                "server does not speak protocol 4.1 (capabilities {:#06x})",
                server_capabilities
            )));
        }

        let mut character_set = 0;
        let mut status_flags = 0;
        if cursor.has_remaining()
            && server_capabilities & capability_flags::CLIENT_SECURE_CONNECTION != 0
        {
            character_set = cursor.read_u8()?;
            status_flags = cursor.read_u16::<LittleEndian>()?;
            server_capabilities |= (cursor.read_u16::<LittleEndian>()? as u32) << 16;

            let auth_data_length = cursor.read_u8()? as usize;
            read_bytes(&mut cursor, 10)?; // reserved

            let salt_2_length = SALT_PART_2_MAX_LEN.min(auth_data_length.saturating_sub(8));
            scramble.extend(read_bytes(&mut cursor, salt_2_length)?);
        }

        Ok(HandshakePacket {
            protocol_version,
            server_version,
            connection_id,
            scramble,
            server_capabilities,
            character_set,
            status_flags,
        })
    }
}

#[cfg(test)]
mod test {
    use super::HandshakePacket;

    /// Greeting captured from a 5.7.10 server.
    pub(crate) const GREETING: [u8; 74] = [
        10, 53, 46, 55, 46, 49, 48, 0, 116, 56, 0, 0, 30, 119, 6, 126, 70, 28, 122, 22, 0, 255,
        255, 8, 2, 0, 255, 193, 21, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 85, 68, 74, 110, 105, 60, 2, 97,
        10, 84, 80, 28, 0, 109, 121, 115, 113, 108, 95, 110, 97, 116, 105, 118, 101, 95, 112, 97,
        115, 115, 119, 111, 114, 100, 0,
    ];

    #[test]
    fn test_parse_greeting() {
        let handshake = HandshakePacket::parse(&GREETING).unwrap();

        assert_eq!(handshake.protocol_version, 10);
        assert_eq!(handshake.server_version, "5.7.10");
        assert_eq!(handshake.connection_id, 0x3874);
        assert_eq!(handshake.character_set, 8);
        assert_eq!(handshake.status_flags, 2);
        assert_eq!(handshake.server_capabilities, 0xC1FF_FFFF);
        assert_eq!(
            handshake.scramble,
            vec![
                30, 119, 6, 126, 70, 28, 122, 22, 85, 68, 74, 110, 105, 60, 2, 97, 10, 84, 80, 28,
                0
            ]
        );
    }

    #[test]
    fn test_old_protocol_version_rejected() {
        let mut packet = GREETING.to_vec();
        packet[0] = 9;
        assert!(HandshakePacket::parse(&packet).is_err());
    }
}
