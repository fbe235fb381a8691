use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::packet::error_packet::ErrorPacket;
use crate::packet::response_type::ResponseType;

pub mod end_of_file_packet;
pub mod error_packet;
pub mod handshake_packet;
pub mod ok_packet;
pub mod response_type;
pub mod result_set_column_packet;
pub mod result_set_row_packet;

/// Fail with the decoded server error when `packet` is an ERR packet.
pub fn check_error_packet(packet: &[u8], message: &str) -> CResult<()> {
    if packet.is_empty() {
        return Err(RelayError::Protocol(format!("{} empty packet", message)));
    }

    if packet[0] == ResponseType::ERROR {
        let error = ErrorPacket::parse(&packet[1..])?;
        return Err(RelayError::ServerError {
            code: error.error_code,
            message: format!("{} {}", message, error.error_message),
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use common::err::decode_error::RelayError;

    use super::check_error_packet;

    #[test]
    fn test_check_error_packet() {
        assert!(check_error_packet(&[0x00], "context.").is_ok());

        let mut packet = vec![0xFF, 10, 0];
        packet.extend_from_slice(b"message");
        match check_error_packet(&packet, "context.") {
            Err(RelayError::ServerError { code, message }) => {
                assert_eq!(code, 10);
                assert_eq!(message, "context. message");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }
}
