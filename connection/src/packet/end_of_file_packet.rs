use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use common::err::CResult;

use crate::packet::response_type::ResponseType;

/// EOF packet body (after the 0xFE marker): warning count and status flags.
#[derive(Debug, Clone, Copy)]
pub struct EndOfFilePacket {
    pub warning_count: u16,
    pub server_status: u16,
}

impl EndOfFilePacket {
    pub fn parse(packet: &[u8]) -> CResult<Self> {
        let mut cursor = Cursor::new(packet);

        // pre-4.1 servers send a bare 0xFE with no body
        let mut warning_count = 0;
        if packet.len() >= 2 {
            warning_count = cursor.read_u16::<LittleEndian>()?;
        }
        let mut server_status = 0;
        if packet.len() >= 4 {
            server_status = cursor.read_u16::<LittleEndian>()?;
        }

        Ok(Self {
            warning_count,
            server_status,
        })
    }

    /// 0xFE also opens 8-byte length-encoded integers; a real EOF packet is
    /// always shorter than 9 bytes.
    pub fn is_eof(packet: &[u8]) -> bool {
        if packet.is_empty() || packet.len() >= 9 {
            return false;
        }
        packet[0] == ResponseType::END_OF_FILE
    }
}
