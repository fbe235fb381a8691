use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use binlog::utils::extract_string;
use common::err::CResult;

/// ERR packet body (after the 0xFF marker): 2-byte error code, then the
/// message up to a NUL terminator or the end of the packet.
#[derive(Debug)]
pub struct ErrorPacket {
    pub error_code: u16,
    pub error_message: String,
}

impl ErrorPacket {
    pub fn parse(packet: &[u8]) -> CResult<Self> {
        let mut cursor = Cursor::new(packet);

        let error_code = cursor.read_u16::<LittleEndian>()?;
        let error_message = extract_string(&packet[cursor.position() as usize..]);

        Ok(Self {
            error_code,
            error_message,
        })
    }
}

#[cfg(test)]
mod test {
    use super::ErrorPacket;

    #[test]
    fn test_parse() {
        let mut packet = vec![10u8, 0];
        packet.extend_from_slice(b"message");
        let error = ErrorPacket::parse(&packet).unwrap();
        assert_eq!(error.error_code, 10);
        assert_eq!(error.error_message, "message");
    }

    #[test]
    fn test_nul_terminated_message() {
        let mut packet = vec![0x15u8, 0x04];
        packet.extend_from_slice(b"Access denied\0trailing");
        let error = ErrorPacket::parse(&packet).unwrap();
        assert_eq!(error.error_code, 1045);
        assert_eq!(error.error_message, "Access denied");
    }
}
