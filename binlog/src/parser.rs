use std::collections::HashMap;
use std::io::Cursor;

use tracing::debug;

use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::events::binlog_event::{BinlogEvent, EventData};
use crate::events::event_header::Header;
use crate::events::event_type::LogEventType;
use crate::events::format_description_event::FormatDescriptionEvent;
use crate::events::query_event::QueryEvent;
use crate::events::rows_event::RowsEvent;
use crate::events::table_map_event::TableMapEvent;
use crate::{EVENT_CHECKSUM_LEN, EVENT_HEADER_LEN};

/// Stateful binlog stream parser.
///
/// Two pieces of state accumulate across events and live as long as the
/// replication session: the FORMAT_DESCRIPTION event (it sizes the table-id
/// field of later events) and the table maps row events are decoded
/// against. The latest map for a table id wins.
#[derive(Debug, Default)]
pub struct BinlogParser {
    pub description: Option<FormatDescriptionEvent>,
    pub table_maps: HashMap<u64, TableMapEvent>,
}

impl BinlogParser {
    pub fn new() -> Self {
        BinlogParser {
            description: None,
            table_maps: HashMap::new(),
        }
    }

    /// Decode one event from its framed bytes (the leading 0x00 packet
    /// marker already stripped).
    pub fn parse(&mut self, data: &[u8]) -> CResult<BinlogEvent> {
        if data.len() < EVENT_HEADER_LEN {
            return Err(RelayError::Decode(format!(
                "binlog event data size {} < {} (binlog v4 only)",
                data.len(),
                EVENT_HEADER_LEN
            )));
        }

        let mut header_cursor = Cursor::new(data);
        let header = Header::parse(&mut header_cursor)?;
        let event_type = header.log_event_type();

        if event_type == LogEventType::FormatDescription {
            let mut cursor = Cursor::new(&data[EVENT_HEADER_LEN..]);
            let description = FormatDescriptionEvent::parse(&mut cursor)?;
            debug!(
                "format description: binlog v{}, server {}",
                description.binlog_version, description.server_version
            );
            self.description = Some(description.clone());
            return Ok(BinlogEvent {
                header,
                data: EventData::FormatDescription(description),
            });
        }

        // The server sends the format description first; nothing else can
        // be decoded without it.
        let description = self.description.as_ref().ok_or_else(|| {
            RelayError::Decode(format!(
                "event type {:#04x} received before the format description",
                header.event_type
            ))
        })?;

        let mut payload_end = data.len();
        if description.events_have_checksum() && payload_end >= EVENT_HEADER_LEN + EVENT_CHECKSUM_LEN
        {
            payload_end -= EVENT_CHECKSUM_LEN;
        }
        let mut cursor = Cursor::new(&data[EVENT_HEADER_LEN..payload_end]);

        let event_data = match event_type {
            LogEventType::Query => EventData::Query(QueryEvent::parse(&mut cursor)?),

            LogEventType::TableMap => {
                let map = TableMapEvent::parse(&mut cursor, self.table_id_size())?;
                self.table_maps.insert(map.table_id, map.clone());
                EventData::TableMap(map)
            }

            event_type if event_type.is_rows() => {
                let rows = RowsEvent::parse(
                    &mut cursor,
                    event_type,
                    self.table_id_size(),
                    &self.table_maps,
                )?;
                EventData::Rows(rows)
            }

            _ => {
                debug!(
                    "skipping unsupported event type {:#04x} at position {}",
                    header.event_type, header.log_pos
                );
                EventData::Unsupported
            }
        };

        Ok(BinlogEvent {
            header,
            data: event_data,
        })
    }

    /// The table id shrinks to four bytes when the announced TABLE_MAP
    /// post-header length is six.
    fn table_id_size(&self) -> usize {
        match &self.description {
            Some(description)
                if description.post_header_len(LogEventType::TableMap as u8) == 6 =>
            {
                4
            }
            _ => 6,
        }
    }
}
