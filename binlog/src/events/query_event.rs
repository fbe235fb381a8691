use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use bytes::Buf;
use serde::Serialize;

use common::err::CResult;

use crate::utils::{read_bytes, read_string};

/// QUERY_EVENT post-header + payload. The statement text is carried as
/// opaque text; no SQL parsing happens here.
///
/// see https://dev.mysql.com/doc/internals/en/query-event.html
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct QueryEvent {
    pub slave_proxy_id: u32,
    pub execution_time: u32,
    pub error_code: u16,
    pub status_vars: Vec<u8>,
    pub schema: String,
    pub query: String,
}

impl QueryEvent {
    pub fn parse(cursor: &mut Cursor<&[u8]>) -> CResult<Self> {
        let slave_proxy_id = cursor.read_u32::<LittleEndian>()?;
        let execution_time = cursor.read_u32::<LittleEndian>()?;
        let schema_length = cursor.read_u8()? as usize;
        let error_code = cursor.read_u16::<LittleEndian>()?;
        let status_vars_length = cursor.read_u16::<LittleEndian>()? as usize;

        let status_vars = read_bytes(cursor, status_vars_length)?;
        let schema = read_string(cursor, schema_length)?;
        cursor.read_u8()?; // NUL separator

        let query = read_string(cursor, cursor.remaining())?;

        Ok(QueryEvent {
            slave_proxy_id,
            execution_time,
            error_code,
            status_vars,
            schema,
            query,
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::QueryEvent;

    #[test]
    fn test_parse() {
        let mut data = Vec::new();
        data.extend_from_slice(&7u32.to_le_bytes()); // slave proxy id
        data.extend_from_slice(&1u32.to_le_bytes()); // execution time
        data.push(4); // schema length
        data.extend_from_slice(&0u16.to_le_bytes()); // error code
        data.extend_from_slice(&2u16.to_le_bytes()); // status vars length
        data.extend_from_slice(&[0x00, 0x01]); // status vars
        data.extend_from_slice(b"shop"); // schema
        data.push(0); // separator
        data.extend_from_slice(b"BEGIN");

        let mut cursor = Cursor::new(data.as_slice());
        let query = QueryEvent::parse(&mut cursor).unwrap();

        assert_eq!(query.slave_proxy_id, 7);
        assert_eq!(query.error_code, 0);
        assert_eq!(query.status_vars, vec![0x00, 0x01]);
        assert_eq!(query.schema, "shop");
        assert_eq!(query.query, "BEGIN");
    }
}
