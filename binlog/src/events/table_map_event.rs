use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;

use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::column::column_type::ColumnType;
use crate::utils::{
    read_bitmap_little_endian, read_bytes, read_len_enc_num, read_string, read_uint_le,
};

/// TABLE_MAP_EVENT payload: associates a `table_id` with schema/table names
/// and per-column type codes + metadata. Every following row event for that
/// id is decoded against the most recent map.
///
/// see https://dev.mysql.com/doc/internals/en/table-map-event.html
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct TableMapEvent {
    pub table_id: u64,

    /// Reserved for future use; currently always 0.
    pub flags: u16,

    pub schema_name: String,
    pub table_name: String,

    pub column_count: usize,
    pub column_types: Vec<u8>,
    pub column_metas: Vec<u16>,

    pub nullable_columns: Vec<bool>,
}

impl TableMapEvent {
    pub fn parse(cursor: &mut Cursor<&[u8]>, table_id_size: usize) -> CResult<Self> {
        let table_id = read_uint_le(cursor, table_id_size)?;
        let flags = cursor.read_u16::<LittleEndian>()?;

        let schema_name = Self::read_counted_name(cursor)?;
        let table_name = Self::read_counted_name(cursor)?;

        let (_, column_count) = read_len_enc_num(cursor)?;
        let column_count = column_count as usize;
        let column_types = read_bytes(cursor, column_count)?;

        let (_, metadata_length) = read_len_enc_num(cursor)?;
        let metadata = read_bytes(cursor, metadata_length as usize)?;
        let column_metas = Self::parse_metadata(&metadata, &column_types)?;

        let nullable_columns = read_bitmap_little_endian(cursor, column_count)?;

        Ok(TableMapEvent {
            table_id,
            flags,
            schema_name,
            table_name,
            column_count,
            column_types,
            column_metas,
            nullable_columns,
        })
    }

    /// 1-byte length, the name, then a NUL terminator.
    fn read_counted_name(cursor: &mut Cursor<&[u8]>) -> CResult<String> {
        let length = cursor.read_u8()? as usize;
        let name = read_string(cursor, length)?;
        let term = cursor.read_u8()?;
        if term != 0 {
            return Err(RelayError::Decode(format!(
                "table map name for {:?} is not NUL terminated",
                name
            )));
        }
        Ok(name)
    }

    /// Consume the metadata blob, one entry per column, sized by type code.
    ///
    /// mysql source: sql/rpl_utility.cc
    fn parse_metadata(metadata: &[u8], column_types: &[u8]) -> CResult<Vec<u16>> {
        let mut cursor = Cursor::new(metadata);
        let mut metas = Vec::with_capacity(column_types.len());

        for &type_code in column_types {
            let meta = match ColumnType::from_code(type_code) {
                // single byte of metadata
                ColumnType::TinyBlob
                | ColumnType::MediumBlob
                | ColumnType::LongBlob
                | ColumnType::Blob
                | ColumnType::Geometry
                | ColumnType::Json
                | ColumnType::Float
                | ColumnType::Double
                | ColumnType::Time2
                | ColumnType::DateTime2
                | ColumnType::Timestamp2 => cursor.read_u8()? as u16,

                // two bytes, high byte first (real type / precision)
                ColumnType::Set
                | ColumnType::Enum
                | ColumnType::String
                | ColumnType::Decimal
                | ColumnType::NewDecimal => {
                    let high = cursor.read_u8()? as u16;
                    let low = cursor.read_u8()? as u16;
                    (high << 8) | low
                }

                // two bytes little-endian
                ColumnType::Bit | ColumnType::VarChar | ColumnType::VarString => {
                    cursor.read_u16::<LittleEndian>()?
                }

                _ => 0,
            };
            metas.push(meta);
        }

        Ok(metas)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::TableMapEvent;

    pub(crate) fn build_payload() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&[1, 0, 0, 0, 0, 0]); // table id, 6 bytes
        data.extend_from_slice(&1u16.to_le_bytes()); // flags
        data.push(1); // schema name length
        data.extend_from_slice(b"d\0");
        data.push(1); // table name length
        data.extend_from_slice(b"t\0");
        data.push(3); // column count
        data.extend_from_slice(&[0x03, 0x0F, 0x0F]); // LONG, VARCHAR, VARCHAR
        data.push(4); // metadata length
        data.extend_from_slice(&[0xFF, 0x00, 0xFF, 0x00]); // varchar max lengths, LE
        data.push(0b0000_0110); // nullable bitmap: columns 1 and 2
        data
    }

    #[test]
    fn test_parse() {
        let payload = build_payload();
        let mut cursor = Cursor::new(payload.as_slice());
        let map = TableMapEvent::parse(&mut cursor, 6).unwrap();

        assert_eq!(map.table_id, 1);
        assert_eq!(map.schema_name, "d");
        assert_eq!(map.table_name, "t");
        assert_eq!(map.column_count, 3);
        assert_eq!(map.column_types, vec![0x03, 0x0F, 0x0F]);
        assert_eq!(map.column_metas, vec![0, 255, 255]);
        assert_eq!(map.nullable_columns, vec![false, true, true]);
        assert_eq!(cursor.position() as usize, payload.len());
    }

    #[test]
    fn test_two_byte_metadata_order() {
        let mut data = Vec::new();
        data.extend_from_slice(&[9, 0, 0, 0]); // table id, 4 bytes
        data.extend_from_slice(&0u16.to_le_bytes());
        data.push(2);
        data.extend_from_slice(b"db\0");
        data.push(1);
        data.extend_from_slice(b"n\0");
        data.push(2); // column count
        data.extend_from_slice(&[0xF6, 0xFE]); // NEWDECIMAL, STRING
        data.push(4);
        data.extend_from_slice(&[10, 2]); // precision 10, scale 2
        data.extend_from_slice(&[0xFE, 20]); // real type STRING, length 20
        data.push(0);

        let mut cursor = Cursor::new(data.as_slice());
        let map = TableMapEvent::parse(&mut cursor, 4).unwrap();

        assert_eq!(map.table_id, 9);
        assert_eq!(map.column_metas, vec![(10 << 8) | 2, (0xFE << 8) | 20]);
    }
}
