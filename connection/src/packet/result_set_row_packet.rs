use std::io::Cursor;

use binlog::utils::read_len_enc_str_allow_null;
use common::err::CResult;

/// Text result-set row: one length-encoded string per column, with the
/// 0xFB prefix marking SQL NULL.
#[derive(Debug)]
pub struct ResultSetRowPacket {
    pub cells: Vec<Option<String>>,
}

impl ResultSetRowPacket {
    pub fn parse(packet: &[u8]) -> CResult<Self> {
        let mut cursor = Cursor::new(packet);

        let len = cursor.get_ref().len() as u64;
        let mut cells = Vec::new();

        while cursor.position() < len {
            cells.push(read_len_enc_str_allow_null(&mut cursor)?);
        }

        Ok(Self { cells })
    }
}

#[cfg(test)]
mod test {
    use super::ResultSetRowPacket;

    #[test]
    fn test_parse() {
        let mut packet = vec![13u8];
        packet.extend_from_slice(b"binlog.000001");
        packet.push(0xFB); // NULL cell
        packet.push(3);
        packet.extend_from_slice(b"120");

        let row = ResultSetRowPacket::parse(&packet).unwrap();
        assert_eq!(
            row.cells,
            vec![
                Some("binlog.000001".to_string()),
                None,
                Some("120".to_string())
            ]
        );
    }
}
