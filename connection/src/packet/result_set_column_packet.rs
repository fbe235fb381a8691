use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use binlog::utils::read_len_enc_str;
use common::err::CResult;

/// Column-definition packet of a text result set.
///
/// see https://dev.mysql.com/doc/internals/en/com-query-response.html#packet-Protocol::ColumnDefinition41
#[derive(Debug, Clone)]
pub struct ResultSetColumnPacket {
    pub catalog: String,
    pub schema: String,
    pub table: String,
    pub org_table: String,
    pub name: String,
    pub org_name: String,
    pub character_set: u16,
    pub column_length: u32,
    pub column_type: u8,
    pub flags: u16,
    pub decimals: u8,
}

impl ResultSetColumnPacket {
    pub fn parse(packet: &[u8]) -> CResult<Self> {
        let mut cursor = Cursor::new(packet);

        let catalog = read_len_enc_str(&mut cursor)?;
        let schema = read_len_enc_str(&mut cursor)?;
        let table = read_len_enc_str(&mut cursor)?;
        let org_table = read_len_enc_str(&mut cursor)?;
        let name = read_len_enc_str(&mut cursor)?;
        let org_name = read_len_enc_str(&mut cursor)?;
        cursor.read_u8()?; // fixed-length-fields marker
        let character_set = cursor.read_u16::<LittleEndian>()?;
        let column_length = cursor.read_u32::<LittleEndian>()?;
        let column_type = cursor.read_u8()?;
        let flags = cursor.read_u16::<LittleEndian>()?;
        let decimals = cursor.read_u8()?;
        cursor.read_u16::<LittleEndian>()?; // filler

        Ok(Self {
            catalog,
            schema,
            table,
            org_table,
            name,
            org_name,
            character_set,
            column_length,
            column_type,
            flags,
            decimals,
        })
    }
}

#[cfg(test)]
mod test {
    use super::ResultSetColumnPacket;

    pub(crate) fn build_packet(name: &str) -> Vec<u8> {
        let mut data = Vec::new();
        data.push(3);
        data.extend_from_slice(b"def");
        for _ in 0..3 {
            data.push(0); // schema, table, org_table
        }
        data.push(name.len() as u8);
        data.extend_from_slice(name.as_bytes());
        data.push(0); // org_name
        data.push(0x0C);
        data.extend_from_slice(&33u16.to_le_bytes());
        data.extend_from_slice(&192u32.to_le_bytes());
        data.push(0xFD);
        data.extend_from_slice(&0u16.to_le_bytes());
        data.push(0);
        data.extend_from_slice(&0u16.to_le_bytes());
        data
    }

    #[test]
    fn test_parse() {
        let column = ResultSetColumnPacket::parse(&build_packet("Log_name")).unwrap();
        assert_eq!(column.catalog, "def");
        assert_eq!(column.name, "Log_name");
        assert_eq!(column.character_set, 33);
        assert_eq!(column.column_length, 192);
        assert_eq!(column.column_type, 0xFD);
        assert_eq!(column.decimals, 0);
    }
}
