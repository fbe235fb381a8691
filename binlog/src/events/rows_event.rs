use std::collections::HashMap;
use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use bytes::Buf;
use serde::Serialize;

use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::events::event_type::LogEventType;
use crate::events::table_map_event::TableMapEvent;
use crate::row::row_data::RowData;
use crate::row::row_parser::parse_row;
use crate::utils::{read_bitmap_little_endian, read_bytes, read_len_enc_num, read_uint_le};

/// WRITE/UPDATE/DELETE_ROWS payload (v1 and v2), decoded against the most
/// recent table map for its table id. Update events carry two images per
/// row; the second one is attached as the `before` image.
///
/// see https://dev.mysql.com/doc/internals/en/rows-event.html
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RowsEvent {
    pub table_id: u64,

    pub schema: String,
    pub table: String,

    pub flags: u16,

    /// v2 extra data, opaque here.
    pub extra_data: Vec<u8>,

    pub rows: Vec<RowData>,
}

impl RowsEvent {
    pub fn parse(
        cursor: &mut Cursor<&[u8]>,
        event_type: LogEventType,
        table_id_size: usize,
        table_maps: &HashMap<u64, TableMapEvent>,
    ) -> CResult<Self> {
        let table_id = read_uint_le(cursor, table_id_size)?;
        let table_map = table_maps.get(&table_id).ok_or_else(|| {
            RelayError::Decode(format!(
                "row event references table id {} with no table map",
                table_id
            ))
        })?;

        let flags = cursor.read_u16::<LittleEndian>()?;

        let extra_data = if event_type.is_rows_v2() {
            // the length includes its own two bytes
            let extra_length = cursor.read_u16::<LittleEndian>()? as usize;
            if extra_length < 2 {
                return Err(RelayError::Decode(format!(
                    "row event extra data length {} is shorter than its own prefix",
                    extra_length
                )));
            }
            read_bytes(cursor, extra_length - 2)?
        } else {
            Vec::new()
        };

        let (_, column_count) = read_len_enc_num(cursor)?;
        let column_count = column_count as usize;
        if column_count != table_map.column_count {
            return Err(RelayError::Decode(format!(
                "row event column count {} does not match table map column count {}",
                column_count, table_map.column_count
            )));
        }

        let present = read_bitmap_little_endian(cursor, column_count)?;
        let present_update = if event_type.is_update_rows() {
            Some(read_bitmap_little_endian(cursor, column_count)?)
        } else {
            None
        };

        let mut rows = Vec::new();
        while cursor.has_remaining() {
            let mut row = parse_row(cursor, table_map, &present)?;
            if let Some(present_update) = &present_update {
                let before = parse_row(cursor, table_map, present_update)?;
                row.before = Some(Box::new(before));
            }
            rows.push(row);
        }

        Ok(RowsEvent {
            table_id,
            schema: table_map.schema_name.clone(),
            table: table_map.table_name.clone(),
            flags,
            extra_data,
            rows,
        })
    }
}
