use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;

use common::err::CResult;

use crate::events::event_type::LogEventType;

/// The 19-byte common header every binlog v4 event starts with.
/// All multi-byte fields are little-endian.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Header {
    pub timestamp: u32,
    pub event_type: u8,
    pub server_id: u32,
    pub event_size: u32,
    pub log_pos: u32,
    pub flags: u16,
}

impl Header {
    pub fn parse(cursor: &mut Cursor<&[u8]>) -> CResult<Self> {
        let timestamp = cursor.read_u32::<LittleEndian>()?;
        let event_type = cursor.read_u8()?;
        let server_id = cursor.read_u32::<LittleEndian>()?;
        let event_size = cursor.read_u32::<LittleEndian>()?;
        let log_pos = cursor.read_u32::<LittleEndian>()?;
        let flags = cursor.read_u16::<LittleEndian>()?;

        Ok(Header {
            timestamp,
            event_type,
            server_id,
            event_size,
            log_pos,
            flags,
        })
    }

    pub fn log_event_type(&self) -> LogEventType {
        LogEventType::from_code(self.event_type)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::events::event_type::LogEventType;

    use super::Header;

    #[test]
    fn test_parse() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x5F00_0001u32.to_le_bytes()); // timestamp
        data.push(0x13); // table map
        data.extend_from_slice(&1u32.to_le_bytes()); // server id
        data.extend_from_slice(&52u32.to_le_bytes()); // event size
        data.extend_from_slice(&1234u32.to_le_bytes()); // log pos
        data.extend_from_slice(&1u16.to_le_bytes()); // flags

        let mut cursor = Cursor::new(data.as_slice());
        let header = Header::parse(&mut cursor).unwrap();

        assert_eq!(header.timestamp, 0x5F00_0001);
        assert_eq!(header.log_event_type(), LogEventType::TableMap);
        assert_eq!(header.server_id, 1);
        assert_eq!(header.event_size, 52);
        assert_eq!(header.log_pos, 1234);
        assert_eq!(header.flags, 1);
        assert_eq!(cursor.position(), 19);
    }
}
